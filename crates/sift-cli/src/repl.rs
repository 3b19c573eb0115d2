//! The interactive command loop.

use rustyline::{error::ReadlineError, DefaultEditor};
use tabled::{builder::Builder, settings::Style};
use tracing::{error, info, warn};

use crate::{error::Result, session::Session};

enum Flow {
    Continue,
    Quit,
}

pub fn run(session: &mut Session) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    info!("Type 'help' for the command list");

    loop {
        let prompt = match session.project() {
            Some(project) => format!("sift:{project}> "),
            None => "sift> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match dispatch(session, line) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    // Command errors are recoverable; the loop goes on.
                    Err(err) => error!("{err}"),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn dispatch(session: &mut Session, line: &str) -> Result<Flow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens[0] {
        "projects" => {
            for entry in session.projects()? {
                info!("{}", entry.project);
            }
        }
        "use" => {
            let Some(project) = tokens.get(1) else {
                warn!("usage: use <project>");
                return Ok(Flow::Continue);
            };
            session.select_project(project)?;
            let field_count = session.schema().map(|schema| schema.len()).unwrap_or(0);
            info!("Loaded {field_count} fields for '{project}'");
        }
        "fields" => print_fields(session)?,
        "operators" => {
            let Some(field) = tokens.get(1) else {
                warn!("usage: operators <field>");
                return Ok(Flow::Continue);
            };
            info!("{}", session.operators_for(field)?.join(", "));
        }
        "set" => {
            let (Some(slot), Some(field)) = (tokens.get(1), tokens.get(2)) else {
                warn!("usage: set <slot> <field> [operator] [value...]");
                return Ok(Flow::Continue);
            };
            let Some(slot) = parse_slot(session, slot) else {
                return Ok(Flow::Continue);
            };

            let operators = session.select_field(slot, Some(field.as_ref()))?;
            match tokens.get(3) {
                Some(operator) => session.select_operator(slot, Some(operator.as_ref()))?,
                None => info!("operators for '{field}': {}", operators.join(", ")),
            }
            if tokens.len() > 4 {
                session.set_value(slot, &tokens[4..].join(" "))?;
            }
        }
        "value" => {
            let Some(slot) = tokens.get(1) else {
                warn!("usage: value <slot> <text...>");
                return Ok(Flow::Continue);
            };
            let Some(slot) = parse_slot(session, slot) else {
                return Ok(Flow::Continue);
            };
            session.set_value(slot, &tokens[2..].join(" "))?;
        }
        "clear" => match tokens.get(1) {
            Some(slot) => {
                let Some(slot) = parse_slot(session, slot) else {
                    return Ok(Flow::Continue);
                };
                session.clear_slot(slot)?;
            }
            None => session.clear_all(),
        },
        "show" => print_slots(session),
        "count" => {
            let count = session.count()?;
            info!("This gives {count} records");
        }
        "help" => print_help(),
        "quit" | "exit" => return Ok(Flow::Quit),
        other => warn!("unknown command '{other}'; type 'help'"),
    }

    Ok(Flow::Continue)
}

/// Parses a 1-based slot reference; bad input is reported and skipped.
fn parse_slot(session: &Session, token: &str) -> Option<usize> {
    match token.parse::<usize>() {
        Ok(number) if (1..=session.filters().len()).contains(&number) => Some(number - 1),
        _ => {
            warn!(
                "'{token}' is not a slot number; this session has slots 1..={}",
                session.filters().len()
            );
            None
        }
    }
}

fn print_fields(session: &Session) -> Result<()> {
    let Some(schema) = session.schema() else {
        warn!("no project selected; run 'use <project>' first");
        return Ok(());
    };

    let mut builder = Builder::new();
    builder.push_record(["field", "type", "description"]);
    for (name, spec) in schema.fields() {
        builder.push_record([
            name.as_str(),
            spec.field_type.as_str(),
            spec.description.as_deref().unwrap_or(""),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");
    Ok(())
}

fn print_slots(session: &Session) {
    for (index, slot) in session.filters().slots().iter().enumerate() {
        let number = index + 1;
        if !slot.is_enabled() {
            info!("{number}: (disabled)");
            continue;
        }
        match slot.field() {
            Some(field) => {
                let operator = slot.operator().unwrap_or("(default)");
                info!("{number}: {field} {operator} '{}'", slot.value());
            }
            None => info!("{number}: (empty)"),
        }
    }
}

fn print_help() {
    info!("projects                            list projects");
    info!("use <project>                       select a project and load its schema");
    info!("fields                              show the project's fields");
    info!("operators <field>                   show the operators legal for a field");
    info!("set <slot> <field> [op] [value...]  configure a filter slot");
    info!("value <slot> <text...>              set a slot's value text");
    info!("clear [slot]                        clear one slot, or all of them");
    info!("show                                show the current slots");
    info!("count                               run the query and count the records");
    info!("quit                                leave");
}
