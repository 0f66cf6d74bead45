//! Console front-end for the hexapod session.
//!
//! Stands in for the graphical control panel: maps typed commands onto
//! the session API and prints status lines and the movement monitor.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use hexkit::{
    init_logging, ConnectionManager, MovementIntent, ParameterIntent, SessionController,
    TokioScheduler,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    println!("hexkit {} ({})", hexkit::VERSION, hexkit::BUILD_DATE);

    let (scheduler, mut ticks) = TokioScheduler::new();
    let mut session = SessionController::new(ConnectionManager::new(), Box::new(scheduler));

    session.try_auto_connect();
    print_status(&session);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(id) = ticks.recv() => {
                session.on_expiry_tick(id);
                if session.current_action().is_none() {
                    println!("[monitor] Idle");
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !dispatch(&mut session, line.trim()) {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    session.disconnect();
    Ok(())
}

/// Map one console line onto the session API; false means quit
fn dispatch(session: &mut SessionController, line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return true;
    };
    let argument = tokens.next();

    match command {
        "w" | "front" => movement(session, MovementIntent::Front),
        "s" | "back" => movement(session, MovementIntent::Back),
        "a" | "left" => movement(session, MovementIntent::Left),
        "d" | "right" => movement(session, MovementIntent::Right),
        "speed" => parameter(session, argument.map(|v| v.parse().map(ParameterIntent::Speed))),
        "height" => parameter(
            session,
            argument.map(|v| v.parse().map(ParameterIntent::LegHeight)),
        ),
        "ports" => {
            for info in session.refresh_ports() {
                println!("  {}  {}", info.port_name, info.description);
            }
            print_status(session);
        }
        "connect" => match argument {
            Some(port) => {
                session.connect(port);
                print_status(session);
            }
            None => println!("usage: connect <port>"),
        },
        "disconnect" => {
            session.disconnect();
            print_status(session);
        }
        "log" => {
            for entry in session.log().entries() {
                println!("  {}", entry.render());
            }
        }
        "help" => print_help(),
        "quit" | "exit" => return false,
        other => println!("unknown command: {} (try 'help')", other),
    }
    true
}

fn movement(session: &mut SessionController, intent: MovementIntent) {
    session.issue_movement(intent);
    println!("[monitor] {}", intent);
    print_status(session);
}

fn parameter(
    session: &mut SessionController,
    parsed: Option<std::result::Result<ParameterIntent, std::num::ParseFloatError>>,
) {
    match parsed {
        Some(Ok(param)) => {
            session.issue_parameter(param);
            print_status(session);
        }
        Some(Err(_)) => println!("expected a number"),
        None => println!("usage: speed <0-100> | height <0-50>"),
    }
}

/// Print the latest status line, as the status monitor would show it
fn print_status(session: &SessionController) {
    if let Some(entry) = session.log().last() {
        println!("{}", entry.render());
    }
}

fn print_help() {
    println!("commands:");
    println!("  w/a/s/d or front/left/back/right  move");
    println!("  speed <0-100>                     set gait speed");
    println!("  height <0-50>                     set leg height");
    println!("  ports | connect <port> | disconnect");
    println!("  log | help | quit");
}
