//! Interactive planner session.
//!
//! # Responsibility
//! - Run first-run setup or greet a returning user.
//! - Drive the six-choice main menu over `PlannerService`.
//!
//! # Invariants
//! - Recoverable service errors print one line and return to the menu.
//! - Repository and terminal I/O errors end the session.
//! - Closing input behaves like "save and exit".

use crate::prompt::{PromptError, Prompter};
use log::info;
use planner_core::{
    normalize_division_name, PlannerRepository, PlannerService, PlannerStore, RepoError,
    ServiceError, SetupError, SetupRequest, TextPresenter, ViewMode,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

const SAVED: &str = "Data saved successfully!";
const GOODBYE: &str = "Thank you for using the Student Planner. Goodbye!";

const MENU: &str = "\nMain Menu:
1. Add event
2. Delete event
3. Add division
4. Delete division
5. View schedule
6. Save and exit";

/// Fatal session errors.
#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Repo(RepoError),
    Setup(SetupError),
    Service(ServiceError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal I/O failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Setup(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Setup(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SetupError> for AppError {
    fn from(value: SetupError) -> Self {
        Self::Setup(value)
    }
}

impl From<ServiceError> for AppError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// Internal control flow: input closure unwinds to the menu loop.
enum Interrupt {
    Closed,
    Fatal(AppError),
}

impl From<PromptError> for Interrupt {
    fn from(value: PromptError) -> Self {
        match value {
            PromptError::Closed => Self::Closed,
            PromptError::Io(err) => Self::Fatal(AppError::Io(err)),
        }
    }
}

impl From<RepoError> for Interrupt {
    fn from(value: RepoError) -> Self {
        Self::Fatal(value.into())
    }
}

impl From<SetupError> for Interrupt {
    fn from(value: SetupError) -> Self {
        Self::Fatal(value.into())
    }
}

impl From<ServiceError> for Interrupt {
    fn from(value: ServiceError) -> Self {
        Self::Fatal(value.into())
    }
}

type Step<T> = Result<T, Interrupt>;

/// Runs a full interactive session against `store`.
pub fn run<R, I, O>(store: PlannerStore<R>, prompter: &mut Prompter<I, O>) -> Result<(), AppError>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    let mut service = match start(store, prompter) {
        Ok(service) => service,
        Err(Interrupt::Closed) => return Ok(()),
        Err(Interrupt::Fatal(err)) => return Err(err),
    };

    loop {
        match menu_step(&mut service, prompter) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(Interrupt::Closed) => {
                service.save()?;
                say(prompter, SAVED)?;
                say(prompter, GOODBYE)?;
                break;
            }
            Err(Interrupt::Fatal(err)) => return Err(err),
        }
    }

    info!("event=session_end module=cli status=ok");
    Ok(())
}

fn say<I: BufRead, O: Write>(prompter: &mut Prompter<I, O>, text: &str) -> Result<(), AppError> {
    prompter.say(text).map_err(|err| match err {
        PromptError::Io(err) => AppError::Io(err),
        PromptError::Closed => AppError::Io(io::ErrorKind::UnexpectedEof.into()),
    })
}

fn start<R, I, O>(
    mut store: PlannerStore<R>,
    prompter: &mut Prompter<I, O>,
) -> Step<PlannerService<R>>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    if store.load()? {
        prompter.say(&format!("Welcome back, {}!", store.user_name()))?;
        info!(
            "event=session_start module=cli status=ok first_run=false divisions={} events={}",
            store.divisions().len(),
            store.events().len()
        );
    } else {
        let user_name = prompter.ask("Enter your name: ")?;
        let count =
            prompter.ask_positive("How many initial divisions would you like to create? ")?;
        let mut divisions = Vec::new();
        for position in 1..=count {
            loop {
                let raw = prompter.ask(&format!("Enter name for division {position}: "))?;
                match normalize_division_name(&raw) {
                    Some(name) => {
                        divisions.push(name);
                        break;
                    }
                    None => prompter.say("Division name cannot be empty. Please try again.")?,
                }
            }
        }

        store.initialize(SetupRequest {
            user_name,
            divisions,
        })?;
        prompter.say(&format!(
            "Welcome, {}! Your planner is set up with the following divisions: {}",
            store.user_name(),
            store.divisions().join(", ")
        ))?;
        info!(
            "event=session_start module=cli status=ok first_run=true divisions={}",
            store.divisions().len()
        );
    }

    store.save()?;
    prompter.say(SAVED)?;
    Ok(PlannerService::new(store))
}

/// Runs one menu round. Returns `false` when the user chose to exit.
fn menu_step<R, I, O>(service: &mut PlannerService<R>, prompter: &mut Prompter<I, O>) -> Step<bool>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    prompter.say(MENU)?;
    let choice = prompter.ask("Enter your choice (1-6): ")?;
    match choice.trim() {
        "1" => add_event(service, prompter)?,
        "2" => delete_event(service, prompter)?,
        "3" => add_division(service, prompter)?,
        "4" => delete_division(service, prompter)?,
        "5" => view_schedule(service, prompter)?,
        "6" => {
            service.save()?;
            prompter.say(SAVED)?;
            prompter.say(GOODBYE)?;
            return Ok(false);
        }
        _ => prompter.say("Invalid choice. Please try again.")?,
    }
    Ok(true)
}

fn add_event<R, I, O>(service: &mut PlannerService<R>, prompter: &mut Prompter<I, O>) -> Step<()>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    let name = prompter.ask("Enter event name: ")?;
    let date = prompter.ask("Enter date (YYYY-MM-DD): ")?;
    let time = prompter.ask("Enter time (HH:MM): ")?;
    list_divisions(service, prompter)?;
    let index = parse_index(&prompter.ask("Enter division number: ")?);

    let outcome = service.add_event(name, date, time, index);
    report(prompter, outcome, |_| "Event added successfully!".to_string())
}

fn delete_event<R, I, O>(service: &mut PlannerService<R>, prompter: &mut Prompter<I, O>) -> Step<()>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    let mut presenter = TextPresenter::new();
    service.view(ViewMode::WholeSchedule, &mut presenter);
    prompter.print(presenter.text())?;
    if service.store().events().is_empty() {
        return Ok(());
    }

    let row = parse_index(&prompter.ask("Enter the number of the event to delete: ")?);
    let outcome = service.delete_scheduled_event(row);
    report(prompter, outcome, |_| "Event deleted successfully!".to_string())
}

fn add_division<R, I, O>(
    service: &mut PlannerService<R>,
    prompter: &mut Prompter<I, O>,
) -> Step<()>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    let name = prompter.ask("Enter new division name: ")?;
    let message = format!("Division '{name}' added successfully!");
    let outcome = service.add_division(name);
    report(prompter, outcome, |()| message)
}

fn delete_division<R, I, O>(
    service: &mut PlannerService<R>,
    prompter: &mut Prompter<I, O>,
) -> Step<()>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    list_divisions(service, prompter)?;
    let index = parse_index(&prompter.ask("Enter the number of the division to delete: ")?);
    let outcome = service.delete_division(index);
    report(prompter, outcome, |deleted| {
        format!(
            "Division '{}' and all associated events deleted successfully!",
            deleted.name
        )
    })
}

fn view_schedule<R, I, O>(service: &PlannerService<R>, prompter: &mut Prompter<I, O>) -> Step<()>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    let mut presenter = TextPresenter::new();
    if service.store().events().is_empty() {
        service.view(ViewMode::WholeSchedule, &mut presenter);
        prompter.print(presenter.text())?;
        return Ok(());
    }

    let view = prompter.ask("View by (1) Whole schedule or (2) Section? ")?;
    let order = if view.trim() == "2" {
        Some(prompter.ask("Order by (1) Chronological or (2) Alphabetical? ")?)
    } else {
        None
    };

    match ViewMode::from_choice(&view, order.as_deref()) {
        Ok(mode) => {
            service.view(mode, &mut presenter);
            prompter.print(presenter.text())?;
        }
        Err(err) => prompter.say(&err.to_string())?,
    }
    Ok(())
}

fn list_divisions<R, I, O>(service: &PlannerService<R>, prompter: &mut Prompter<I, O>) -> Step<()>
where
    R: PlannerRepository,
    I: BufRead,
    O: Write,
{
    prompter.say("Available divisions:")?;
    for (index, division) in service.store().divisions().iter().enumerate() {
        prompter.say(&format!("{}. {}", index + 1, division))?;
    }
    Ok(())
}

/// Non-numeric input maps to 0, which every 1-based selection rejects.
fn parse_index(raw: &str) -> usize {
    raw.trim().parse().unwrap_or(0)
}

fn report<T, I, O>(
    prompter: &mut Prompter<I, O>,
    outcome: Result<T, ServiceError>,
    success: impl FnOnce(T) -> String,
) -> Step<()>
where
    I: BufRead,
    O: Write,
{
    match outcome {
        Ok(value) => {
            prompter.say(&success(value))?;
            prompter.say(SAVED)?;
        }
        Err(err) if err.is_recoverable() => prompter.say(&err.to_string())?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
