use anyhow::Context;
use clap::Parser;
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tandem::render::{self, PagerWriter};
use tandem::rows::{DiffRow, DiffRowGenerator, RowKind};

#[derive(Parser)]
#[command(
    name = "tandem",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Compare two text files side by side",
    long_about = "Compares two text files line by line and prints an aligned \
    side-by-side view of the differences, optionally highlighting the changed \
    words within changed lines.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(index = 1, help = "The old file")]
    old: PathBuf,
    #[arg(index = 2, help = "The new file")]
    new: PathBuf,
    #[arg(
        short,
        long,
        help = "Highlight the changed spans within changed lines ([-old-] / {+new+})"
    )]
    inline: bool,
    #[arg(long, help = "Inline highlighting at character instead of word granularity")]
    chars: bool,
    #[arg(
        short = 'b',
        long = "ignore-whitespace",
        help = "Treat lines differing only in whitespace as equal"
    )]
    ignore_whitespace: bool,
    #[arg(short, long, help = "Fold the revised text into a single merged column")]
    merge: bool,
    #[arg(
        long,
        help = "Print lines verbatim, without whitespace normalization or markers"
    )]
    plain: bool,
    #[arg(
        short = 'w',
        long,
        default_value_t = 0,
        help = "Hard-wrap columns at this many characters (0 = unlimited)"
    )]
    width: usize,
    #[arg(long, help = "Never pipe the output through the pager")]
    no_pager: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            eprintln!("tandem: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let original = read_lines(&cli.old)?;
    let revised = read_lines(&cli.new)?;

    let mut builder = DiffRowGenerator::builder()
        .show_inline_diffs(cli.inline)
        .inline_diff_by_word(!cli.chars)
        .ignore_white_spaces(cli.ignore_whitespace)
        .merge_original_revised(cli.merge)
        .report_lines_unchanged(cli.plain)
        .column_width(cli.width);
    if cli.inline || cli.merge {
        // word-diff style markers read better in a terminal than the
        // default HTML spans
        builder = builder
            .old_tag(Box::new(|opening| {
                if opening { "[-" } else { "-]" }.to_string()
            }))
            .new_tag(Box::new(|opening| {
                if opening { "{+" } else { "+}" }.to_string()
            }));
    }
    let generator = builder.build()?;

    let rows = generator.generate_diff_rows(&original, &revised)?;
    let changed = rows.iter().any(|row| row.kind != RowKind::Equal);

    if cli.no_pager || !std::io::stdout().is_terminal() {
        print_rows(&mut std::io::stdout(), &rows, cli.merge)?;
    } else {
        let pager = minus::Pager::new();
        let mut writer = PagerWriter::new(pager.clone());
        print_rows(&mut writer, &rows, cli.merge)?;
        minus::page_all(pager)?;
    }

    Ok(changed)
}

fn print_rows(
    writer: &mut dyn std::io::Write,
    rows: &[DiffRow],
    merge: bool,
) -> anyhow::Result<()> {
    if merge {
        render::merged(writer, rows)
    } else {
        render::side_by_side(writer, rows)
    }
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}
