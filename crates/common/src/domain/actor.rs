/// Identity under which every remote wiki call is executed.
///
/// `client` is the configured client/site token; it travels with the actor
/// instead of being read from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiActor {
    pub username: String,
    pub client: String,
}

impl WikiActor {
    pub fn new(username: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            client: client.into(),
        }
    }
}
