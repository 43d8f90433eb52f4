mod annotate;
mod app;
mod config;
mod error;
mod handler;
mod input;
mod model;
mod output;
mod syntax;
mod theme;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use app::{App, AppOptions, FocusedPanel, InputMode};
use handler::{
    handle_help_action, handle_inspector_action, handle_issue_list_action,
    handle_stylesheet_list_action,
};
use input::map_key_to_action;
use model::CompatReport;

fn main() -> anyhow::Result<()> {
    let cli_args = theme::parse_cli_args();

    let Some(report_path) = cli_args.report else {
        eprintln!("Error: missing report path");
        eprintln!("\nUsage: compatview [OPTIONS] <REPORT>  (see --help)");
        std::process::exit(2);
    };

    let config_outcome = config::load_config().unwrap_or_default();
    for warning in &config_outcome.warnings {
        eprintln!("{warning}");
    }
    let user_config = config_outcome.config.unwrap_or_default();

    let (theme, theme_warnings) =
        theme::resolve_theme_with_config(cli_args.theme, user_config.theme.as_deref());
    for warning in &theme_warnings {
        eprintln!("{warning}");
    }

    let mut options = AppOptions::default();
    if let Some(margin) = user_config.scroll_margin {
        options.scroll_margin = margin;
    }
    options.default_browser = user_config.default_browser;

    let report = match CompatReport::load(&report_path) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "\nMake sure {} is a compatibility report produced by the analysis stage.",
                report_path.display()
            );
            std::process::exit(1);
        }
    };

    let mut app = match App::new(report, theme, options) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Setup panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        // Render
        terminal.draw(|frame| {
            ui::render(frame, &mut app);
        })?;

        // Handle events
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            let action = map_key_to_action(key, app.input_mode);

            // Dispatch by input mode, then by focused panel
            match app.input_mode {
                InputMode::Help => handle_help_action(&mut app, action),
                InputMode::Normal => match app.focused_panel {
                    FocusedPanel::Stylesheets => handle_stylesheet_list_action(&mut app, action),
                    FocusedPanel::Issues => handle_issue_list_action(&mut app, action),
                    FocusedPanel::Inspector => handle_inspector_action(&mut app, action),
                },
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    // Print export content after the terminal is restored
    if let Some(content) = app.pending_stdout_output.take() {
        println!("{content}");
    }

    Ok(())
}
