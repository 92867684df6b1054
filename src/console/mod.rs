mod command;
mod render;
#[cfg(test)]
mod tests;

use medguide_lookup::{AdverseEventSource, LookupOutcome, MedicineLookup, analysis_for, suggest};
use medguide_models::reminder::{NewReminder, ReminderId};
use medguide_storage::ReminderStore;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::app::App;

use command::HELP;
pub use command::ConsoleCommand;

const GREETING: &str = "Welcome to MedGuide! Type /help to see the supported commands.";

/// Reads commands line by line until `/quit`, end of input or shutdown.
pub async fn run<S, R, W>(
    app: &mut App<S>,
    mut input: R,
    output: &mut W,
    shutdown: CancellationToken,
) -> anyhow::Result<()>
where
    S: AdverseEventSource,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    log::info!("Starting console interaction interface");
    let mut buffer = Vec::new();

    write_message(output, GREETING).await?;
    let startup_warnings = warnings(app.store_mut());
    if !startup_warnings.is_empty() {
        write_message(output, &startup_warnings).await?;
    }

    loop {
        buffer.clear();
        let read = tokio::select! {
            _ = shutdown.cancelled() => break,
            read = input.read_until(b'\n', &mut buffer) => read?,
        };
        if read == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and fall through to the usual parse errors.
        let line = String::from_utf8_lossy(&buffer);
        if line.trim().is_empty() {
            continue;
        }

        let reply = match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => break,
            Ok(command) => handle_command(app, command).await,
            Err(error) => error.to_string(),
        };
        write_message(output, &reply).await?;
    }

    write_message(output, "Goodbye!").await?;
    Ok(())
}

pub async fn handle_command<S: AdverseEventSource>(
    app: &mut App<S>,
    command: ConsoleCommand,
) -> String {
    match command {
        ConsoleCommand::Add(candidate) => add_reminder(app.store_mut(), &candidate),
        ConsoleCommand::List => render::reminder_list(app.store().list()),
        ConsoleCommand::Delete(id) => delete_reminder(app.store_mut(), &id),
        ConsoleCommand::Lookup(query) => lookup(app.lookup(), &query).await,
        ConsoleCommand::Suggest(query) => render::suggestions(&query, &suggest(&query)),
        ConsoleCommand::Analysis(medicine) => {
            render::analysis(&medicine, analysis_for(&medicine))
        }
        ConsoleCommand::Help => HELP.to_string(),
        ConsoleCommand::Quit => "Goodbye!".to_string(),
    }
}

fn add_reminder(store: &mut ReminderStore, candidate: &NewReminder) -> String {
    let reply = match store.add(candidate) {
        Ok(reminder) => format!(
            "Success! {} reminder added for {} ({}).",
            reminder.name,
            reminder.time.to_12_hour(),
            reminder.frequency.display_name()
        ),
        Err(error) => format!("Validation error: {}", error),
    };
    with_warnings(reply, store)
}

fn delete_reminder(store: &mut ReminderStore, id: &ReminderId) -> String {
    let reply = match store.delete(id) {
        Some(reminder) => format!("{} reminder has been removed.", reminder.name),
        None => format!("There is no reminder with id {}.", id),
    };
    with_warnings(reply, store)
}

async fn lookup<S: AdverseEventSource>(lookup: &MedicineLookup<S>, query: &str) -> String {
    match lookup.search(query).await {
        Ok(LookupOutcome::Applied(state)) => render::lookup_state(&state),
        Ok(LookupOutcome::Discarded) => render::lookup_state(&lookup.state()),
        Err(error) => format!("Validation error: {}", error),
    }
}

fn with_warnings(reply: String, store: &mut ReminderStore) -> String {
    let warnings = warnings(store);
    if warnings.is_empty() {
        reply
    } else {
        format!("{}\n{}", reply, warnings)
    }
}

fn warnings(store: &mut ReminderStore) -> String {
    store
        .take_warnings()
        .iter()
        .map(|warning| format!("Warning: {}", warning))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn write_message<W: AsyncWrite + Unpin>(output: &mut W, message: &str) -> io::Result<()> {
    output.write_all(message.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
