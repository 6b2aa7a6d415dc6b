// tests/scenarios.rs
//
// Cenários de ponta a ponta sobre um AppState compartilhado: cada
// "sessão" é um clone do estado agindo em nome de um usuário diferente,
// como abas distintas sobre o mesmo armazenamento.

use std::rc::Rc;

use hoso_core::common::error::AppError;
use hoso_core::config::AppState;
use hoso_core::models::auth::{RegisterStaffPayload, User};
use hoso_core::models::profile::{CreateProfilePayload, DocumentDraft, DocumentType, ProfileStatus};
use hoso_core::services::lock_service::OpenMode;
use hoso_core::services::permission::{self, ApprovalPolicy};
use hoso_core::services::profile_service::PushFlagPolicy;
use hoso_core::store::{MemoryBackend, StorageBackend};

fn fresh_state() -> AppState {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .try_init()
        .ok();

    let backend: Rc<dyn StorageBackend> = Rc::new(MemoryBackend::new());
    AppState::with_backend(backend, ApprovalPolicy::Anyone, PushFlagPolicy::SetOnce)
        .expect("falha ao montar o estado de teste")
}

fn register(state: &AppState, username: &str, full_name: &str) -> User {
    state
        .auth_service
        .register_staff(RegisterStaffPayload {
            full_name: full_name.to_owned(),
            username: username.to_owned(),
            phone_number: None,
            area: "Quận 1".to_owned(),
            password: "abc123@".to_owned(),
        })
        .expect("falha ao cadastrar cán bộ")
}

fn create_profile(state: &AppState, phone: &str, collector: &User) -> uuid::Uuid {
    state
        .profile_service
        .create_profile(
            CreateProfilePayload {
                phone_number: phone.to_owned(),
                cccd_front: "cccd-front".to_owned(),
                cccd_back: "cccd-back".to_owned(),
            },
            collector,
        )
        .expect("falha ao criar hồ sơ")
        .profile
        .id
}

// Cenário A: criar, anexar um giấy phép lái xe, completar.
#[test]
fn scenario_a_collect_and_complete() {
    let state = fresh_state();
    let collector = register(&state, "canboa", "Nguyễn Văn A");
    let id = create_profile(&state, "0900000001", &collector);

    state
        .profile_service
        .add_document(
            id,
            DocumentDraft {
                doc_type: DocumentType::License,
                image_front: "front".to_owned(),
                image_back: "back".to_owned(),
            },
        )
        .unwrap();

    let done = state.profile_service.complete(id).unwrap();
    assert_eq!(done.status, ProfileStatus::Completed);
    assert_eq!(done.documents.len(), 1);
}

// Cenário B: A segura o lock; B recebe o conflito com o nome de A e o
// titular não muda.
#[test]
fn scenario_b_lock_conflict_between_two_sessions() {
    let state = fresh_state();
    let a = register(&state, "canboa", "Nguyễn Văn A");
    let b = register(&state, "canbob", "Trần Thị B");
    let id = create_profile(&state, "0900000002", &a);

    // Sessão de A: outro clone do mesmo estado compartilhado.
    let session_a = state.clone();
    session_a.lock_service.acquire(id, &a).unwrap();

    let err = state.lock_service.open(id, OpenMode::View, &b).unwrap_err();
    match err {
        AppError::ProfileLocked { viewed_by_name } => assert_eq!(viewed_by_name, "Nguyễn Văn A"),
        other => panic!("esperava conflito de lock, veio {other:?}"),
    }
    assert_eq!(state.profile_store.get(id).unwrap().viewed_by, Some(a.id));

    // A sai da tela; agora B entra normalmente.
    session_a.lock_service.release(id, &a);
    let opened = state.lock_service.open(id, OpenMode::View, &b).unwrap();
    assert!(opened.read_only);
}

// Cenário C: staff que não é o coletor nem admin não tem direito de
// remover; o chamador (a UI) bloqueia a chamada e nada muda no store.
#[test]
fn scenario_c_caller_blocks_removal_without_rights() {
    let state = fresh_state();
    let collector = register(&state, "canboa", "Nguyễn Văn A");
    let stranger = register(&state, "canbob", "Trần Thị B");
    let id = create_profile(&state, "0900000003", &collector);

    let with_doc = state
        .profile_service
        .add_document(
            id,
            DocumentDraft {
                doc_type: DocumentType::Registration,
                image_front: "front".to_owned(),
                image_back: "back".to_owned(),
            },
        )
        .unwrap();
    let doc_id = with_doc.documents[0].id;

    let profile = state.profile_service.get(id).unwrap();
    assert!(!permission::can_delete_document(&stranger, &profile));
    // A UI consulta o avaliador e nem chama remove_document.

    let unchanged = state.profile_service.get(id).unwrap();
    assert_eq!(unchanged.documents.len(), 1);
    assert_eq!(unchanged.documents[0].id, doc_id);
}

// Cenário D: aprovação com push=true; a segunda chamada não altera nem
// o approvedAt nem o sinalizador (política SetOnce).
#[test]
fn scenario_d_approval_is_terminal_and_monotonic() {
    let state = fresh_state();
    let collector = register(&state, "canboa", "Nguyễn Văn A");
    let id = create_profile(&state, "0900000004", &collector);

    let approved = state.profile_service.approve(id, true, &collector).unwrap();
    assert!(approved.is_approved);
    assert!(approved.is_pushed_to_external);
    assert_eq!(approved.status, ProfileStatus::Completed);
    let approved_at = approved.approved_at.expect("approvedAt deve estar gravado");

    let again = state.profile_service.approve(id, false, &collector).unwrap();
    assert!(again.is_pushed_to_external);
    assert_eq!(again.approved_at, Some(approved_at));

    // Depois de aprovado o hồ sơ continua "visitável": o lock ainda
    // alterna normalmente entre usuários autorizados.
    let opened = state
        .lock_service
        .open(id, OpenMode::Edit, &collector)
        .unwrap();
    assert!(opened.read_only); // aprovado nunca mais é editável
    state.lock_service.release(id, &collector);
}

// Logout no meio da visualização: o lock não pode ficar órfão.
#[test]
fn logout_mid_view_frees_the_profile_for_others() {
    let state = fresh_state();
    let a = register(&state, "canboa", "Nguyễn Văn A");
    let b = register(&state, "canbob", "Trần Thị B");
    let id = create_profile(&state, "0900000005", &a);

    state.auth_service.login("canboa", "abc123@").unwrap();
    state.lock_service.open(id, OpenMode::Edit, &a).unwrap();

    state.auth_service.logout(Some(id)).unwrap();

    let opened = state.lock_service.open(id, OpenMode::View, &b).unwrap();
    assert_eq!(opened.profile.viewed_by, Some(b.id));
}
