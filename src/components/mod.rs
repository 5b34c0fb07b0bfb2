pub mod add_contact_dialog;
pub mod campaign_wizard;
pub mod contacts_panel;
pub mod import_sheets_dialog;
pub mod new_chat_dialog;
pub mod sidebar;
pub mod theme_toggle;
pub mod toast;

pub use add_contact_dialog::AddContactDialog;
pub use campaign_wizard::CampaignWizard;
pub use contacts_panel::ContactsPanel;
pub use import_sheets_dialog::ImportSheetsDialog;
pub use new_chat_dialog::NewChatDialog;
pub use sidebar::Sidebar;
pub use theme_toggle::ThemeToggle;
pub use toast::ToastHost;
