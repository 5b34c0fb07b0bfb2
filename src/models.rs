//! Domain Models
//!
//! Plain records mirroring backend API responses. The backend serializes
//! Mongo-style `_id` fields; everything here accepts either `id` or `_id`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
}

/// The signed-in user's business profile, a superset of [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub created_at: String,
}

fn default_source() -> String {
    "manual".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    #[serde(alias = "_id")]
    pub id: String,
    pub contact_id: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(alias = "_id")]
    pub id: String,
    pub thread_id: String,
    /// "inbound" | "outbound"
    pub direction: String,
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    /// "sent" | "delivered" | "read" | "failed"
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub template_id: Option<String>,
    /// "draft" | "active" | "completed" | "paused"
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_contacts: u32,
    #[serde(default)]
    pub delivered_count: u32,
    #[serde(default)]
    pub read_count: u32,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignStats {
    pub campaign_id: String,
    pub total_contacts: u32,
    #[serde(default)]
    pub sent_count: u32,
    #[serde(default)]
    pub delivered_count: u32,
    #[serde(default)]
    pub read_count: u32,
    #[serde(default)]
    pub failed_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignContact {
    pub contact_id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub message_status: String,
    #[serde(default)]
    pub sent_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateParameter {
    pub name: String,
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// "marketing" | "utility" | "authentication" | "transactional"
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub parameters: Vec<TemplateParameter>,
    /// "approved" | "pending" | "rejected"
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator_id: String,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_following: bool,
    #[serde(default)]
    pub is_creator: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessage {
    #[serde(alias = "_id")]
    pub id: String,
    pub channel_id: String,
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub community_id: Option<String>,
    #[serde(default)]
    pub creator_id: String,
    #[serde(default)]
    pub members_count: u32,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator_id: String,
    #[serde(default)]
    pub announcement_group_id: String,
    #[serde(default)]
    pub members_count: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMessage {
    #[serde(alias = "_id")]
    pub id: String,
    pub group_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(alias = "_id")]
    pub id: String,
    pub contact_id: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub viewed: bool,
    #[serde(default)]
    pub views_count: u32,
}

/// The thread shown in the chat conversation panel.
///
/// Selecting a contact that has no server-side thread yet must still open a
/// conversation view. That case is `Pending`: the thread exists only locally
/// until the backend confirms one (first message sent or threads refetched).
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveThread {
    Pending(Contact),
    Confirmed(ChatThread),
}

impl ActiveThread {
    pub fn contact_id(&self) -> &str {
        match self {
            ActiveThread::Pending(c) => &c.id,
            ActiveThread::Confirmed(t) => &t.contact_id,
        }
    }

    pub fn contact_name(&self) -> &str {
        match self {
            ActiveThread::Pending(c) => &c.name,
            ActiveThread::Confirmed(t) => &t.contact_name,
        }
    }

    pub fn contact_phone(&self) -> &str {
        match self {
            ActiveThread::Pending(c) => &c.phone,
            ActiveThread::Confirmed(t) => &t.contact_phone,
        }
    }

    pub fn thread_id(&self) -> Option<&str> {
        match self {
            ActiveThread::Pending(_) => None,
            ActiveThread::Confirmed(t) => Some(&t.id),
        }
    }
}

/// Percentage of `part` over `whole`, clamped to 0..=100. Zero denominators
/// render as 0% rather than dividing.
pub fn progress_pct(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (((part as f64 / whole as f64) * 100.0).round() as u32).min(100)
}

/// Search match on a contact-like row: case-insensitive substring on the name,
/// raw substring on the phone. Either field matching is enough.
pub fn matches_query(name: &str, phone: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase()) || phone.contains(query)
}

/// Up to two avatar initials from a display name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_pct_zero_total_is_zero() {
        assert_eq!(progress_pct(0, 0), 0);
        assert_eq!(progress_pct(10, 0), 0);
    }

    #[test]
    fn progress_pct_stays_in_range() {
        assert_eq!(progress_pct(0, 40), 0);
        assert_eq!(progress_pct(20, 40), 50);
        assert_eq!(progress_pct(40, 40), 100);
        // Counts can briefly overshoot totals while stats settle.
        assert_eq!(progress_pct(50, 40), 100);
    }

    #[test]
    fn search_matches_phone_only_substring() {
        assert!(matches_query("Arjun Singh", "+91 98765 43210", "98765"));
        assert!(matches_query("Arjun Singh", "+91 98765 43210", "arjun"));
        assert!(!matches_query("Arjun Singh", "+91 98765 43210", "priya"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches_query("", "", ""));
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Arjun Singh"), "AS");
        assert_eq!(initials("Priya"), "P");
        assert_eq!(initials("Manpreet Kaur Gill"), "MK");
    }

    #[test]
    fn profile_accepts_mongo_id_and_missing_optionals() {
        let p: Profile = serde_json::from_str(
            r#"{"_id":"u1","name":"Arjun Singh","email":"arjun@example.com","created_at":""}"#,
        )
        .unwrap();
        assert_eq!(p.id, "u1");
        assert_eq!(p.phone, None);
        assert_eq!(p.business_name, None);
        assert_eq!(p.about, None);
    }

    #[test]
    fn active_thread_exposes_contact_fields() {
        let contact = Contact {
            id: "c1".into(),
            user_id: String::new(),
            name: "Neha Reddy".into(),
            phone: "+91 92109 87654".into(),
            email: None,
            tags: vec![],
            source: "manual".into(),
            created_at: String::new(),
        };
        let pending = ActiveThread::Pending(contact);
        assert_eq!(pending.contact_id(), "c1");
        assert_eq!(pending.thread_id(), None);

        let confirmed = ActiveThread::Confirmed(ChatThread {
            id: "t1".into(),
            contact_id: "c1".into(),
            contact_name: "Neha Reddy".into(),
            contact_phone: "+91 92109 87654".into(),
            last_message: None,
            unread_count: 0,
            updated_at: String::new(),
        });
        assert_eq!(confirmed.thread_id(), Some("t1"));
        assert_eq!(confirmed.contact_name(), "Neha Reddy");
    }

    #[test]
    fn thread_accepts_mongo_style_id() {
        let json = r#"{"_id":"abc","contact_id":"c1","contact_name":"A","contact_phone":"+1","last_message":null,"unread_count":2,"updated_at":"2024-01-01T00:00:00"}"#;
        let thread: ChatThread = serde_json::from_str(json).unwrap();
        assert_eq!(thread.id, "abc");
        assert_eq!(thread.unread_count, 2);
    }
}
