use super::QueryKey;

/// A state-changing operation, and the cached reads it makes stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    RegisterUser,
    Login,
    Logout,
    RegisterProject,
    DeleteProject(String),
    UpdatePreferences,
    AddProjectMember(String),
}

/// What a successful mutation does to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    Keys(Vec<QueryKey>),
    All,
}

impl Mutation {
    #[must_use]
    pub fn invalidates(&self) -> Invalidation {
        match self {
            // Every cached read is scoped to the authenticated user.
            Mutation::RegisterUser | Mutation::Login | Mutation::Logout => Invalidation::All,
            Mutation::UpdatePreferences => Invalidation::Keys(vec![QueryKey::current_user()]),
            Mutation::RegisterProject => Invalidation::Keys(vec![QueryKey::project_list()]),
            Mutation::DeleteProject(id) => Invalidation::Keys(vec![
                QueryKey::project_list(),
                QueryKey::project(id),
                QueryKey::project_members(id),
            ]),
            Mutation::AddProjectMember(project_id) => Invalidation::Keys(vec![
                QueryKey::project_members(project_id),
                QueryKey::project(project_id),
            ]),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::RegisterUser => "register_user",
            Mutation::Login => "login",
            Mutation::Logout => "logout",
            Mutation::RegisterProject => "register_project",
            Mutation::DeleteProject(_) => "delete_project",
            Mutation::UpdatePreferences => "update_preferences",
            Mutation::AddProjectMember(_) => "add_project_member",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_mutations_invalidate_project_list() {
        for mutation in [Mutation::RegisterProject, Mutation::DeleteProject("p1".into())] {
            let Invalidation::Keys(keys) = mutation.invalidates() else {
                panic!("{} should invalidate specific keys", mutation.name());
            };
            assert!(keys.contains(&QueryKey::project_list()));
        }
    }

    #[test]
    fn test_delete_invalidates_project_detail() {
        let Invalidation::Keys(keys) = Mutation::DeleteProject("p1".into()).invalidates() else {
            panic!("expected keys");
        };
        assert!(keys.contains(&QueryKey::project("p1")));
        assert!(keys.contains(&QueryKey::project_members("p1")));
        assert!(!keys.contains(&QueryKey::project("p2")));
        assert!(!keys.contains(&QueryKey::project_members("p2")));
    }

    #[test]
    fn test_preferences_invalidate_current_user() {
        assert_eq!(
            Mutation::UpdatePreferences.invalidates(),
            Invalidation::Keys(vec![QueryKey::current_user()])
        );
    }

    #[test]
    fn test_new_member_invalidates_member_list() {
        let Invalidation::Keys(keys) = Mutation::AddProjectMember("p1".into()).invalidates() else {
            panic!("expected keys");
        };
        assert!(keys.contains(&QueryKey::project_members("p1")));
        assert!(!keys.contains(&QueryKey::project_list()));
    }

    #[test]
    fn test_identity_changes_clear_everything() {
        for mutation in [Mutation::Logout, Mutation::Login, Mutation::RegisterUser] {
            assert_eq!(mutation.invalidates(), Invalidation::All, "{}", mutation.name());
        }
    }
}
