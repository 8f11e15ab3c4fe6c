//! Team request bodies.

use serde::Serialize;

/// Body for creating or renaming a team.
#[derive(Debug, Clone, Serialize)]
pub struct TeamBody {
    /// Team name.
    pub name: String,
}

/// Body for joining a team by invite code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamBody {
    /// Team access code.
    pub access_code: String,
}

/// Body for adding a member or changing a member's role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUserBody {
    /// Member to add. Omitted when updating an existing member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// `team-owner` or `team-member`.
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_team_body() {
        let body = JoinTeamBody {
            access_code: "XYZ123".to_string(),
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"accessCode": "XYZ123"}));
    }

    #[test]
    fn test_team_user_body_for_role_change() {
        let body = TeamUserBody {
            user_id: None,
            role: "team-owner".to_string(),
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"role": "team-owner"}));
    }
}
