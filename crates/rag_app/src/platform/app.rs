use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rag_core::{update, AppState, Failure, Msg, Notice};
use rag_logging::{rag_debug, rag_error};

use super::cli::{Cli, Plan};
use super::effects::{Delivery, EffectRunner};
use super::logging::{self, LogDestination};
use super::ui::render::{render, render_notice, render_resume_page, Style};

/// How long to wait for a client event before ticking.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(
        LogDestination::from_flag(cli.log_file),
        logging::level_for(cli.verbose),
    );

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            rag_error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the command finished without an error notice.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let settings = cli.settings().context("invalid client configuration")?;
    let runner = EffectRunner::new(settings).context("failed to start the client")?;
    let mut session = Session::new(runner, Style::detect());

    Ok(match cli.command.plan() {
        Plan::Messages(msgs) => session.drive(msgs),
        Plan::ListResumes { limit, offset } => session.list_resumes(limit, offset),
    })
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    style: Style,
    last_frame: Vec<String>,
}

impl Session {
    fn new(runner: EffectRunner, style: Style) -> Self {
        Self {
            state: AppState::new(),
            runner,
            style,
            last_frame: Vec::new(),
        }
    }

    /// Feeds `msgs` through the state machine, then pumps client events
    /// until no request is pending.
    fn drive(&mut self, msgs: Vec<Msg>) -> bool {
        for msg in msgs {
            self.dispatch(msg);
        }
        while self.state.is_busy() {
            match self.runner.next(TICK) {
                Ok(Some(Delivery::Msg(msg))) => self.dispatch(msg),
                Ok(Some(Delivery::Resumes(_))) => {
                    rag_debug!("Ignoring unrequested resume listing")
                }
                Ok(None) => self.dispatch(Msg::Tick),
                Err(stopped) => {
                    rag_error!("{}", stopped);
                    self.dispatch(Msg::ClientStopped(client_stopped()));
                }
            }
        }
        !self.state.view().has_error()
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let frame = render(&state.view(), self.style);
            self.show(frame);
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn list_resumes(&mut self, limit: u32, offset: u64) -> bool {
        self.runner.list_resumes(limit, offset);
        loop {
            let failure = match self.runner.next(TICK) {
                Ok(Some(Delivery::Resumes(Ok(page)))) => {
                    self.show(render_resume_page(&page, self.style));
                    return true;
                }
                Ok(Some(Delivery::Resumes(Err(failure)))) => failure,
                Ok(Some(Delivery::Msg(msg))) => {
                    self.dispatch(msg);
                    continue;
                }
                Ok(None) => continue,
                Err(stopped) => {
                    rag_error!("{}", stopped);
                    client_stopped()
                }
            };
            let notice = Notice::error(format!("An error occurred: {failure}"));
            self.show(vec![render_notice(&notice, self.style)]);
            return false;
        }
    }

    /// Prints a frame unless it repeats the previous one.
    fn show(&mut self, frame: Vec<String>) {
        if frame.is_empty() || frame == self.last_frame {
            return;
        }
        for line in &frame {
            println!("{line}");
        }
        self.last_frame = frame;
    }
}

fn client_stopped() -> Failure {
    Failure::unreachable("client stopped")
}
