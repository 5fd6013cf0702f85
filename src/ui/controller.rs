// Console Controller - drives the hero from line commands
//
// This module contains the ConsoleController which coordinates between:
// - The terminal (commands in, rendered frames out)
// - StateManager (hero state)
// - SlideRotator / BookingController (business logic)
//
// It handles:
// - Starting and cancelling the rotation timer for the lifetime of the view
// - Subscribing to state changes → redraws
// - Dispatching commands, spawning submissions so input stays responsive

use crate::metrics::Metrics;
use crate::models::{BookingField, HeroConfig, SlideDescriptor};
use crate::services::{
    BookingController, BookingTransport, InputValidator, LinkOpener, MessagingLinkBuilder,
    RotationGuard, SectionNavigator, SlideRotator, SubmitError,
};
use crate::state::{StateChange, StateManager};
use crate::ui::render::{HeroFrame, service_options};
use anyhow::{Context, Result};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

const HELP_TEXT: &str = "\
Commands:
  next | prev            show the next / previous slide
  goto <n>               show slide n (1-based)
  set <field> <value>    fill a form field (name, email, phone, service, date, time)
  submit                 send the quick booking
  dismiss                close the result message
  specialties            list doctor specialties
  contact <n>            open the chat link for specialty n
  view-all               jump to the full doctors list
  show                   redraw the hero
  help                   this text
  quit                   exit";

/// Errors from parsing a command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0} is not a number")]
    NotANumber(String),

    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    /// 1-based slide number, as shown on the indicators
    Goto(usize),
    Set(BookingField, String),
    Submit,
    Dismiss,
    Specialties,
    /// 1-based specialty number
    Contact(usize),
    ViewAll,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let number = |usage: &'static str| -> Result<usize, CommandError> {
            if rest.is_empty() {
                return Err(CommandError::Usage(usage));
            }
            rest.parse::<usize>()
                .map_err(|_| CommandError::NotANumber(rest.to_string()))
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "next" => Ok(Command::Next),
            "prev" => Ok(Command::Prev),
            "goto" => number("goto <n>").map(Command::Goto),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                let field = BookingField::from_str(field)
                    .map_err(|_| CommandError::UnknownField(field.to_string()))?;
                Ok(Command::Set(field, value.to_string()))
            }
            "submit" => Ok(Command::Submit),
            "dismiss" | "close" => Ok(Command::Dismiss),
            "specialties" => Ok(Command::Specialties),
            "contact" => number("contact <n>").map(Command::Contact),
            "view-all" => Ok(Command::ViewAll),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Whether the command loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Console controller that wires the terminal to hero state and logic
///
/// # Example
/// ```ignore
/// let controller = ConsoleController::new(state, &config, transport, opener, metrics)?;
/// let stdin = tokio::io::BufReader::new(tokio::io::stdin());
/// controller.run(stdin).await?;  // Returns on 'quit' or end of input
/// ```
pub struct ConsoleController {
    state: StateManager,
    slides: Vec<SlideDescriptor>,
    rotation_interval: Duration,
    rotator: SlideRotator,
    booking: BookingController,
    validator: InputValidator,
    messaging: MessagingLinkBuilder,
    navigator: SectionNavigator,

    /// Auto-advance timer; present while the hero is on screen
    rotation: Option<RotationGuard>,

    /// Submissions spawned from the command loop
    submissions: Vec<JoinHandle<()>>,
}

impl ConsoleController {
    pub fn new(
        state: StateManager,
        config: &HeroConfig,
        transport: Arc<dyn BookingTransport>,
        opener: Arc<dyn LinkOpener>,
        metrics: Arc<Metrics>,
    ) -> Result<Self> {
        let slides = config.slider.slides.clone();
        let rotator = SlideRotator::new(slides.clone(), state.clone(), Arc::clone(&metrics))
            .context("Failed to create slide rotator")?;

        let booking = BookingController::new(
            state.clone(),
            transport,
            config.booking.notes.clone(),
            Arc::clone(&metrics),
        );

        let messaging = MessagingLinkBuilder::new(
            config.messaging.number.clone(),
            config.messaging.specialties.clone(),
            opener,
            Arc::clone(&metrics),
        );

        let navigator = SectionNavigator::new(
            config.navigation.sections.clone(),
            state.clone(),
            metrics,
        );

        tracing::info!("Console controller initialized");

        Ok(Self {
            state,
            slides,
            rotation_interval: config.slider.interval(),
            rotator,
            booking,
            validator: InputValidator::new(),
            messaging,
            navigator,
            rotation: None,
            submissions: Vec::new(),
        })
    }

    /// Run the hero until `quit` or end of input.
    ///
    /// The rotation timer and the redraw subscription exist only for the
    /// duration of this call. Submissions still in flight at exit are awaited.
    pub async fn run<R>(mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.rotation = Some(
            self.rotator
                .start(self.rotation_interval)
                .context("Failed to start rotation timer")?,
        );
        let redraw = self.spawn_redraw_task();

        println!("{}", self.frame().to_text());
        println!("Type 'help' for commands.");

        let mut lines = input.lines();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read command input")?
        {
            if line.trim().is_empty() {
                continue;
            }

            let flow = match line.parse::<Command>() {
                Ok(command) => self.handle(command),
                Err(e) => {
                    println!("{}", e);
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        self.shutdown(redraw).await;
        Ok(())
    }

    /// Apply one command.
    pub fn handle(&mut self, command: Command) -> Flow {
        tracing::debug!("Command: {:?}", command);

        match command {
            Command::Next => {
                self.rotator.advance();
            }
            Command::Prev => {
                self.rotator.retreat();
            }
            Command::Goto(n) => {
                if n == 0 || n > self.rotator.len() {
                    println!("Slide must be between 1 and {}", self.rotator.len());
                } else {
                    self.rotator.jump_to(n - 1);
                }
            }
            Command::Set(field, value) => {
                if let Err(e) = self.booking.set_field(field, value) {
                    let options: Vec<&str> = service_options().iter().map(|(v, _)| *v).collect();
                    println!("{} (options: {})", e, options.join(", "));
                }
            }
            Command::Submit => self.submit(),
            Command::Dismiss => self.booking.dismiss_notification(),
            Command::Specialties => {
                for (i, name) in self.messaging.specialties().enumerate() {
                    println!("  {:>2}. {}", i + 1, name);
                }
            }
            Command::Contact(n) => match n.checked_sub(1).and_then(|i| self.messaging.specialty_at(i)) {
                Some(name) => match self.messaging.contact(name) {
                    Ok(link) => println!("Chat link: {}", link),
                    Err(e) => println!("Could not open chat link: {}", e),
                },
                None => println!("No specialty number {}", n),
            },
            Command::ViewAll => {
                if !self.navigator.view_all_doctors() {
                    println!("Doctors list is not on this page");
                }
            }
            Command::Show => println!("{}", self.frame().to_text()),
            Command::Help => println!("{}", HELP_TEXT),
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    /// Current render of the hero.
    pub fn frame(&self) -> HeroFrame {
        self.state.read(|s| HeroFrame::render(s, &self.slides))
    }

    /// Input-layer check, then hand the request to a background task.
    fn submit(&mut self) {
        let form = self.state.read(|s| s.form.clone());
        let issues = self.validator.validate(&form);
        if !issues.is_empty() {
            for issue in issues {
                println!("  {}", issue);
            }
            return;
        }

        self.submissions.retain(|task| !task.is_finished());

        let booking = self.booking.clone();
        self.submissions.push(tokio::spawn(async move {
            match booking.submit().await {
                Ok(notification) => {
                    tracing::debug!("Submission resolved: {}", notification.kind)
                }
                Err(SubmitError::InFlight) => println!("A booking is already being sent"),
                Err(e) => tracing::warn!("Submission refused: {}", e),
            }
        }));
    }

    /// Redraw on every state change until aborted.
    fn spawn_redraw_task(&self) -> JoinHandle<()> {
        let mut rx = self.state.subscribe();
        let state = self.state.clone();
        let slides = self.slides.clone();

        tokio::spawn(async move {
            tracing::debug!("Redraw task started");

            loop {
                match rx.recv().await {
                    Ok(change) => {
                        tracing::trace!("State change received: {:?}", change);

                        match change {
                            StateChange::SlideChanged { .. }
                            | StateChange::NotificationShown { .. }
                            | StateChange::NotificationDismissed
                            | StateChange::FormReset => {
                                let frame = state.read(|s| HeroFrame::render(s, &slides));
                                println!("{}", frame.to_text());
                            }
                            StateChange::SubmissionStarted => println!("Sending booking request..."),
                            StateChange::SectionFocused { anchor } => {
                                println!("Scrolled to #{}", anchor)
                            }
                            StateChange::FormChanged | StateChange::SubmissionFinished => {}
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Redraw lagged, skipped {} state changes", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            tracing::debug!("Redraw task terminated");
        })
    }

    async fn shutdown(&mut self, redraw: JoinHandle<()>) {
        if let Some(guard) = self.rotation.take() {
            guard.cancel();
        }

        for task in self.submissions.drain(..) {
            if let Err(e) = task.await {
                tracing::error!("Submission task join error: {}", e);
            }
        }

        redraw.abort();
        tracing::info!("Console controller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!("next".parse::<Command>(), Ok(Command::Next));
        assert_eq!(" PREV ".parse::<Command>(), Ok(Command::Prev));
        assert_eq!("goto 2".parse::<Command>(), Ok(Command::Goto(2)));
        assert_eq!("view-all".parse::<Command>(), Ok(Command::ViewAll));
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            "set name Asha Rao".parse::<Command>(),
            Ok(Command::Set(BookingField::Name, "Asha Rao".to_string()))
        );
        assert_eq!(
            "set date".parse::<Command>(),
            Ok(Command::Set(BookingField::Date, String::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "goto".parse::<Command>(),
            Err(CommandError::Usage("goto <n>"))
        );
        assert_eq!(
            "goto two".parse::<Command>(),
            Err(CommandError::NotANumber("two".to_string()))
        );
        assert_eq!(
            "set age 30".parse::<Command>(),
            Err(CommandError::UnknownField("age".to_string()))
        );
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
    }
}
