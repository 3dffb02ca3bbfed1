/// Application name
pub const APP_NAME: &str = "Contact Form";

/// Path of the create-contact endpoint
pub const CONTACT_API_PATH: &str = "/api/contact";

/// Default HTTP listen port (server)
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default server URL the form client posts to
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Shown when the client-side completeness check fails
pub const MSG_FILL_ALL_DETAILS: &str = "Please fill all the details";

/// Shown after the server accepted a submission
pub const MSG_SUBMIT_SUCCESS: &str = "Form submitted successfully!";

/// Shown when a submission failed and the server gave no message
pub const MSG_SUBMIT_FALLBACK: &str =
    "An error occurred while submitting the form. Please try again.";
