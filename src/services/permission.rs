// src/services/permission.rs

use crate::models::{auth::User, profile::Profile};

// O avaliador de permissões: predicados puros, sem acesso a store e sem
// efeito colateral. Toda decisão de política mora aqui — antes ela
// ficava espalhada pelos call sites das telas, agora mudar uma regra
// toca um lugar só.

// Quem pode aprovar um hồ sơ. A aplicação original deixava qualquer
// usuário autenticado aprovar; restringir ao admin ou a quem tem o
// sinalizador can_approve é escolha de configuração (ver AppState),
// não invariante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalPolicy {
    #[default]
    Anyone,
    ApproversOnly,
}

// Editar = admin OU o cán bộ que coletou — e nunca depois da aprovação,
// independente do papel.
pub fn can_edit(user: &User, profile: &Profile) -> bool {
    if profile.is_approved {
        return false;
    }
    user.is_admin() || profile.collector_id == user.id
}

// Remover um giấy tờ segue exatamente a regra de edição.
pub fn can_delete_document(user: &User, profile: &Profile) -> bool {
    can_edit(user, profile)
}

pub fn can_approve(user: &User, policy: ApprovalPolicy) -> bool {
    match policy {
        ApprovalPolicy::Anyone => true,
        ApprovalPolicy::ApproversOnly => user.is_admin() || user.can_approve,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: Role, can_approve: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "u".to_owned(),
            password: "abc123@".to_owned(),
            full_name: "Nguyễn Văn A".to_owned(),
            role,
            phone_number: None,
            area: None,
            can_approve,
            created_at: Utc::now(),
        }
    }

    fn profile_of(collector: &User) -> Profile {
        Profile::new("0900000001".to_owned(), "f".into(), "b".into(), collector)
    }

    #[test]
    fn collector_and_admin_can_edit_others_cannot() {
        let collector = user(Role::Staff, false);
        let admin = user(Role::Admin, false);
        let stranger = user(Role::Staff, false);
        let profile = profile_of(&collector);

        assert!(can_edit(&collector, &profile));
        assert!(can_edit(&admin, &profile));
        assert!(!can_edit(&stranger, &profile));
        assert_eq!(
            can_delete_document(&stranger, &profile),
            can_edit(&stranger, &profile)
        );
    }

    #[test]
    fn approved_profile_is_never_editable() {
        let collector = user(Role::Staff, false);
        let admin = user(Role::Admin, false);
        let mut profile = profile_of(&collector);
        profile.is_approved = true;

        assert!(!can_edit(&collector, &profile));
        assert!(!can_edit(&admin, &profile));
        assert!(!can_delete_document(&admin, &profile));
    }

    #[test]
    fn approval_policy_gates_who_approves() {
        let staff = user(Role::Staff, false);
        let approver = user(Role::Staff, true);
        let admin = user(Role::Admin, false);

        // Comportamento original: todo mundo aprova.
        assert!(can_approve(&staff, ApprovalPolicy::Anyone));

        assert!(!can_approve(&staff, ApprovalPolicy::ApproversOnly));
        assert!(can_approve(&approver, ApprovalPolicy::ApproversOnly));
        assert!(can_approve(&admin, ApprovalPolicy::ApproversOnly));
    }
}
