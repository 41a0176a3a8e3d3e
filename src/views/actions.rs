//! Inline button actions
//!
//! Callback data uses `section:argument` strings.

use crate::models::submission::PublishMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Submit,
    MyStats,
    MyPending,
    AdminPanel,
    ReviewQueue,
    ChangeChannel,
    BotStats,
    BackToMain,
    /// Forwarding consent answer
    Forward(bool),
    Cancel,
    Approve { submission_id: i64, mode: PublishMode },
    Reject { submission_id: i64 },
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        let parts: Vec<&str> = data.split(':').collect();

        let action = match parts.as_slice() {
            ["submit"] => CallbackAction::Submit,
            ["stats", "me"] => CallbackAction::MyStats,
            ["pending", "mine"] => CallbackAction::MyPending,
            ["admin", "panel"] => CallbackAction::AdminPanel,
            ["admin", "pending"] => CallbackAction::ReviewQueue,
            ["admin", "channel"] => CallbackAction::ChangeChannel,
            ["admin", "stats"] => CallbackAction::BotStats,
            ["menu", "back"] => CallbackAction::BackToMain,
            ["forward", "yes"] => CallbackAction::Forward(true),
            ["forward", "no"] => CallbackAction::Forward(false),
            ["cancel"] => CallbackAction::Cancel,
            ["approve", "author", id] => CallbackAction::Approve {
                submission_id: id.parse().ok()?,
                mode: PublishMode::WithAuthor,
            },
            ["approve", "anon", id] => CallbackAction::Approve {
                submission_id: id.parse().ok()?,
                mode: PublishMode::Anonymous,
            },
            ["reject", id] => CallbackAction::Reject {
                submission_id: id.parse().ok()?,
            },
            _ => return None,
        };

        Some(action)
    }

    pub fn to_data(&self) -> String {
        match self {
            CallbackAction::Submit => "submit".to_string(),
            CallbackAction::MyStats => "stats:me".to_string(),
            CallbackAction::MyPending => "pending:mine".to_string(),
            CallbackAction::AdminPanel => "admin:panel".to_string(),
            CallbackAction::ReviewQueue => "admin:pending".to_string(),
            CallbackAction::ChangeChannel => "admin:channel".to_string(),
            CallbackAction::BotStats => "admin:stats".to_string(),
            CallbackAction::BackToMain => "menu:back".to_string(),
            CallbackAction::Forward(true) => "forward:yes".to_string(),
            CallbackAction::Forward(false) => "forward:no".to_string(),
            CallbackAction::Cancel => "cancel".to_string(),
            CallbackAction::Approve { submission_id, mode: PublishMode::WithAuthor } => {
                format!("approve:author:{}", submission_id)
            }
            CallbackAction::Approve { submission_id, mode: PublishMode::Anonymous } => {
                format!("approve:anon:{}", submission_id)
            }
            CallbackAction::Reject { submission_id } => format!("reject:{}", submission_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_actions() {
        assert_eq!(
            CallbackAction::parse("approve:author:12"),
            Some(CallbackAction::Approve { submission_id: 12, mode: PublishMode::WithAuthor })
        );
        assert_eq!(
            CallbackAction::parse("approve:anon:3"),
            Some(CallbackAction::Approve { submission_id: 3, mode: PublishMode::Anonymous })
        );
        assert_eq!(CallbackAction::parse("reject:7"), Some(CallbackAction::Reject { submission_id: 7 }));
        assert_eq!(CallbackAction::Reject { submission_id: 7 }.to_data(), "reject:7");
    }

    #[test]
    fn test_unknown_data() {
        assert_eq!(CallbackAction::parse(""), None);
        assert_eq!(CallbackAction::parse("reject:abc"), None);
        assert_eq!(CallbackAction::parse("approve:loud:1"), None);
        assert_eq!(CallbackAction::parse("lang:en"), None);
    }

    #[test]
    fn test_menu_actions_parse_back() {
        let actions = [
            CallbackAction::Submit,
            CallbackAction::MyStats,
            CallbackAction::MyPending,
            CallbackAction::AdminPanel,
            CallbackAction::ReviewQueue,
            CallbackAction::ChangeChannel,
            CallbackAction::BotStats,
            CallbackAction::BackToMain,
            CallbackAction::Forward(true),
            CallbackAction::Forward(false),
            CallbackAction::Cancel,
        ];
        for action in actions {
            assert_eq!(CallbackAction::parse(&action.to_data()), Some(action));
        }
    }
}
