pub mod campaigns;
pub mod channels;
pub mod chat;
pub mod communities;
pub mod contacts;
pub mod dashboard;
pub mod login;
pub mod settings;
pub mod status;
pub mod templates;

pub use campaigns::CampaignsPage;
pub use channels::ChannelsPage;
pub use chat::ChatPage;
pub use communities::CommunitiesPage;
pub use contacts::ContactsPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use settings::SettingsPage;
pub use status::StatusPage;
pub use templates::TemplatesPage;
