//! CLI entry point for gl-style-editor.

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr};

use gl_style_editor::cli::Cli;
use gl_style_editor::config::{load_store, render};
use gl_style_editor::logging::init_logging;
use gl_style_editor::panel::assemble_all;
use gl_style_editor::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "gl-style-editor",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let _guard = init_logging(cli.log_file.as_deref(), Some(&cli.log_level));

    let store = load_store(cli.params.as_deref()).wrap_err("Failed to resolve parameters")?;

    // Fail before touching the terminal if any control cannot bind
    assemble_all(&store).wrap_err("Parameters do not fit the settings panel")?;

    if let Some(format) = cli.print_params {
        let text = render(&store, format.into()).wrap_err("Failed to serialize parameters")?;
        print!("{text}");
        return Ok(());
    }

    tui::run(store)
}
