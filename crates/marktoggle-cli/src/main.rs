use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use marktoggle_core::{
    EditorDocument, EditorRope, KeyCombo, KeydownResult, MarkdownCommand, PlainEditor, TextRange,
    Toolbar, UndoableBuffer,
};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing_subscriber::EnvFilter;

mod config;
mod selection;

use config::CliConfig;
use selection::parse_selection;

/// Undo depth for the in-memory document. The CLI applies one command per run.
const UNDO_STEPS: usize = 16;

#[derive(Parser)]
#[command(version, about = "marktoggle - markdown toolbar commands for plain text files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a KDL config file
    #[arg(long, global = true, env = "MARKTOGGLE_CONFIG")]
    config: Option<PathBuf>,

    /// Use macOS shortcuts (Cmd as the primary modifier)
    #[arg(long, global = true)]
    mac: bool,

    /// Log toolbar decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a toolbar command to a selection
    Apply {
        /// Markdown file to edit
        file: PathBuf,

        /// Command name, e.g. toggle-bold (see `marktoggle list`)
        command: MarkdownCommand,

        #[command(flatten)]
        target: Target,
    },
    /// Apply whatever command a key combination is bound to
    Key {
        /// Markdown file to edit
        file: PathBuf,

        /// Key combination, e.g. ctrl+shift+8
        combo: KeyCombo,

        #[command(flatten)]
        target: Target,
    },
    /// List commands with their titles and shortcuts
    List,
    /// Print the effective configuration as JSON
    Config,
}

#[derive(Args)]
struct Target {
    /// Selection as LINE:COL or LINE:COL-LINE:COL (1-based)
    #[arg(short, long, value_parser = parse_selection, default_value = "1:1")]
    selection: TextRange,

    /// Write the result here instead of stdout
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(short, long)]
    in_place: bool,
}

fn main() -> Result<()> {
    init_miette()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match cli.command {
        Commands::Apply {
            file,
            command,
            target,
        } => {
            edit_file(&file, &target, &config, cli.mac, |toolbar| {
                Ok(toolbar.invoke(command))
            })?;
        }
        Commands::Key {
            file,
            combo,
            target,
        } => {
            edit_file(&file, &target, &config, cli.mac, |toolbar| {
                match toolbar.handle_key(&combo) {
                    KeydownResult::Handled => Ok(true),
                    _ => Err(miette::miette!("{combo} is not bound to a toolbar command")),
                }
            })?;
        }
        Commands::List => list_commands(&config, cli.mac),
        Commands::Config => print_config(&config, cli.mac)?,
    }

    Ok(())
}

type FileToolbar<'d> = Toolbar<'d, PlainEditor<UndoableBuffer<EditorRope>>>;

fn edit_file(
    path: &Path,
    target: &Target,
    config: &CliConfig,
    is_mac: bool,
    run: impl FnOnce(&mut FileToolbar<'_>) -> Result<bool>,
) -> Result<()> {
    let markers = config.toolbar.validate().into_diagnostic()?;
    let content = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    let mut editor = PlainEditor::new(UndoableBuffer::new(EditorRope::from_str(&content), UNDO_STEPS));
    editor
        .offset_range(target.selection)
        .into_diagnostic()
        .wrap_err("selection is outside the document")?;
    editor.set_selection(Some(target.selection));

    let changed = {
        let mut toolbar = Toolbar::bound(&mut editor, markers).with_keybindings(config.keybindings(is_mac));
        run(&mut toolbar)?
    };

    if changed {
        if let Some(selection) = editor.selection() {
            tracing::info!(%selection, "selection after command");
        }
    } else {
        eprintln!("nothing to change");
    }

    let result = editor.content_string();
    let destination = if target.in_place {
        Some(path)
    } else {
        target.output.as_deref()
    };
    match destination {
        Some(out) => std::fs::write(out, result)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", out.display()))?,
        None => print!("{result}"),
    }

    Ok(())
}

fn list_commands(config: &CliConfig, is_mac: bool) {
    let keybindings = config.keybindings(is_mac);
    for command in MarkdownCommand::ALL {
        let shortcut = keybindings
            .shortcut_for(command)
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{:<24} {:<16} {}", command.name(), command.title(), shortcut);
    }
}

fn print_config(config: &CliConfig, is_mac: bool) -> Result<()> {
    config.toolbar.validate().into_diagnostic()?;
    let keybindings: serde_json::Map<String, serde_json::Value> = config
        .keybindings(is_mac)
        .iter()
        .map(|(combo, command)| (combo.to_string(), command.name().into()))
        .collect();
    let json = serde_json::json!({
        "toolbar": config.toolbar,
        "keybindings": keybindings,
    });
    println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}
