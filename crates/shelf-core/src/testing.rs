use crate::command::{Command, CommandInner};
use crate::model::Model;
use futures::future::BoxFuture;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// A headless harness that drives a [`Model`] without a terminal.
///
/// Immediate messages ([`Command::message`]) are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages). Async commands are *not*
/// run eagerly: they are parked as pending tasks so a test can settle them in
/// whatever order it wants with [`resolve`](TestProgram::resolve). That is how
/// out-of-order network responses are reproduced deterministically.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Shelf>::new(flags);
/// assert_eq!(prog.pending_tasks(), 1);   // the initial page fetch
/// prog.resolve(0).await;                 // deliver its response
/// assert!(prog.render_string(60, 20).contains("Essence Mascara"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    tasks: Vec<BoxFuture<'static, M::Message>>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            tasks: Vec::new(),
            quit: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process queued immediate messages until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Number of async tasks waiting to be resolved.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Await the pending task at `index` (dispatch order) and feed its message
    /// to [`Model::update`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub async fn resolve(&mut self, index: usize) {
        let task = self.tasks.remove(index);
        let msg = task.await;
        self.send(msg);
    }

    /// Resolve every pending task, oldest first, including tasks spawned by
    /// the updates that resolving triggers.
    pub async fn resolve_all(&mut self) {
        while !self.tasks.is_empty() {
            self.resolve(0).await;
        }
    }

    /// Whether the model has returned [`Command::quit`].
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Render the model into a [`Buffer`] of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend never fails");
        terminal
            .draw(|frame| self.model.view(frame))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the screen as newline-separated rows.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.pending_messages.push(msg),
            CommandInner::Quit => self.quit = true,
            CommandInner::Future(fut) => self.tasks.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    // Echoes whatever its tasks deliver, in arrival order.
    struct Echo {
        seen: Vec<String>,
    }

    #[derive(Debug)]
    enum EchoMsg {
        Fetch(&'static str),
        Got(String),
        Chain,
        Quit,
    }

    impl Model for Echo {
        type Message = EchoMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<EchoMsg>) {
            (
                Echo { seen: vec![] },
                Command::perform(async { "boot".to_string() }, EchoMsg::Got),
            )
        }

        fn update(&mut self, msg: EchoMsg) -> Command<EchoMsg> {
            match msg {
                EchoMsg::Fetch(text) => {
                    Command::perform(async move { text.to_string() }, EchoMsg::Got)
                }
                EchoMsg::Got(text) => {
                    self.seen.push(text);
                    Command::none()
                }
                EchoMsg::Chain => Command::message(EchoMsg::Got("chained".into())),
                EchoMsg::Quit => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(self.seen.join(",")), frame.area());
        }
    }

    #[test]
    fn init_task_is_parked() {
        let prog = TestProgram::<Echo>::new(());
        assert_eq!(prog.pending_tasks(), 1);
        assert!(prog.model().seen.is_empty());
    }

    #[tokio::test]
    async fn tasks_resolve_in_chosen_order() {
        let mut prog = TestProgram::<Echo>::new(());
        prog.send(EchoMsg::Fetch("first"));
        prog.send(EchoMsg::Fetch("second"));
        assert_eq!(prog.pending_tasks(), 3);

        prog.resolve(2).await;
        prog.resolve(1).await;
        prog.resolve(0).await;
        assert_eq!(prog.model().seen, vec!["second", "first", "boot"]);
    }

    #[test]
    fn immediate_messages_drain() {
        let mut prog = TestProgram::<Echo>::new(());
        prog.send(EchoMsg::Chain);
        assert!(prog.model().seen.is_empty());
        prog.drain_messages();
        assert_eq!(prog.model().seen, vec!["chained"]);
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Echo>::new(());
        prog.send(EchoMsg::Quit);
        assert!(prog.has_quit());
    }

    #[tokio::test]
    async fn render_string_reflects_state() {
        let mut prog = TestProgram::<Echo>::new(());
        prog.resolve_all().await;
        let screen = prog.render_string(20, 2);
        assert!(screen.starts_with("boot"));
        assert_eq!(screen.lines().count(), 2);
    }
}
