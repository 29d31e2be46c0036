use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait.
///
/// The runtime calls [`init`](Model::init) once, renders with
/// [`view`](Model::view), and then feeds every message (terminal input,
/// timer ticks, finished fetches) through [`update`](Model::update),
/// re-rendering after each one.
///
/// # Example
///
/// ```rust,ignore
/// use shelf_core::{Command, Model};
/// use ratatui::Frame;
/// use ratatui::widgets::Paragraph;
///
/// struct Greeting {
///     text: Option<String>,
/// }
///
/// enum Msg {
///     Loaded(String),
/// }
///
/// impl Model for Greeting {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) {
///         let fetch = Command::perform(async { "hello".to_string() }, Msg::Loaded);
///         (Greeting { text: None }, fetch)
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Loaded(text) => self.text = Some(text),
///         }
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         let text = self.text.as_deref().unwrap_or("Loading...");
///         frame.render_widget(Paragraph::new(text), frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    ///
    /// Messages arrive from [`Subscription`]s, from [`Command::message`], or
    /// from async work completed via [`Command::perform`].
    type Message: Send + 'static;

    /// Startup data passed to [`Model::init`] (configuration, injected
    /// clients, and so on).
    type Flags: Send + 'static;

    /// Create the initial state and the command to run at startup.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Must not mutate observable state.
    fn view(&self, frame: &mut Frame);

    /// Declare active subscriptions. Called after every update.
    ///
    /// The runtime diffs the returned list against the previously active set:
    /// new subscriptions are started and removed ones are cancelled.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
