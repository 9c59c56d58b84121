use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use ropey::Rope;
use tagjump::kernel::jump::{KeyLayout, Motion, StandardBoundaries, Tag};
use tagjump::kernel::services::adapters::{ensure_settings_file, load_settings};
use tagjump::kernel::services::ports::JumpSettings;
use tagjump::kernel::{Session, SessionEvent};
use tagjump::models::Document;

mod logging;

const USAGE: &str = "usage: tagjump <file> <query> [--regex] [--caret N] [--layout NAME] [--chars CHARS] [--select TAG]";

#[derive(Debug)]
struct CliArgs {
    path: PathBuf,
    query: String,
    regex: bool,
    caret: usize,
    layout: Option<KeyLayout>,
    chars: Option<String>,
    select: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut positional = Vec::new();
    let mut regex = false;
    let mut caret = 0;
    let mut layout = None;
    let mut chars = None;
    let mut select = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--regex" => regex = true,
            "--caret" => {
                let value = args.next().ok_or("--caret needs a value")?;
                caret = value
                    .parse()
                    .map_err(|_| format!("invalid caret offset: {value}"))?;
            }
            "--layout" => {
                let value = args.next().ok_or("--layout needs a value")?;
                layout = Some(
                    KeyLayout::from_name(&value).ok_or(format!("unknown layout: {value}"))?,
                );
            }
            "--chars" => chars = Some(args.next().ok_or("--chars needs a value")?),
            "--select" => select = Some(args.next().ok_or("--select needs a value")?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(path), Some(query), None) = (positional.next(), positional.next(), positional.next())
    else {
        return Err(USAGE.to_string());
    };
    if query.is_empty() {
        return Err("query must not be empty".to_string());
    }

    Ok(CliArgs {
        path: PathBuf::from(path),
        query,
        regex,
        caret,
        layout,
        chars,
        select,
    })
}

fn main() -> io::Result<ExitCode> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return Ok(ExitCode::from(2));
        }
    };

    let _logging = logging::init();

    if let Err(err) = ensure_settings_file() {
        tracing::warn!(error = %err, "failed to create settings file");
    }
    let mut settings = load_settings().unwrap_or_default();
    if let Some(layout) = args.layout {
        settings.layout = layout;
    }
    if let Some(chars) = &args.chars {
        settings.allowed_chars = chars.clone();
    }

    let rope = Rope::from_reader(BufReader::new(File::open(&args.path)?))?;
    let doc = Document::new(rope).with_caret(args.caret);
    tracing::info!(path = %args.path.display(), chars = doc.len_chars(), "opened document");

    let event = run(&args, doc.clone(), settings).map_err(io::Error::other)?;
    Ok(report(&doc, event))
}

fn run(args: &CliArgs, doc: Document, settings: JumpSettings) -> tagjump::Result<SessionEvent> {
    let delay = settings.skim_delay();
    let mut session = Session::new(doc, settings);
    let now = Instant::now();

    let mut event = if args.regex {
        session.start_regex_search(&args.query, &StandardBoundaries::WholeFile)?
    } else {
        let mut event = SessionEvent::Rejected;
        for ch in args.query.chars() {
            event = session.type_char(ch, now);
            if matches!(event, SessionEvent::Rejected | SessionEvent::Jumped(_)) {
                break;
            }
        }
        event
    };

    if let Some(solved) = session.tick(now + delay) {
        event = solved;
    }

    if let (Some(tag), SessionEvent::Marked { .. }) = (&args.select, &event) {
        for ch in tag.chars() {
            event = session.type_char(ch, now);
            if matches!(event, SessionEvent::Rejected | SessionEvent::Jumped(_)) {
                break;
            }
        }
    }
    Ok(event)
}

fn report(doc: &Document, event: SessionEvent) -> ExitCode {
    match event {
        SessionEvent::Marked { tags, .. } if tags.is_empty() => {
            eprintln!("no match");
            ExitCode::FAILURE
        }
        SessionEvent::Marked { tags, full } => {
            print_tags(doc, &tags);
            if !full {
                eprintln!("not every match could be tagged");
            }
            ExitCode::SUCCESS
        }
        SessionEvent::Skimmed(results) => {
            for offset in results {
                println!("{}\t{offset}", position(doc, offset));
            }
            ExitCode::SUCCESS
        }
        SessionEvent::Jumped(motion) | SessionEvent::Visited(motion) => {
            print_motion(doc, &motion);
            ExitCode::SUCCESS
        }
        SessionEvent::Rejected => {
            eprintln!("no match");
            ExitCode::FAILURE
        }
    }
}

fn print_tags(doc: &Document, tags: &[(Tag, usize)]) {
    for (tag, offset) in tags {
        println!("{tag}\t{}\t{offset}", position(doc, *offset));
    }
}

fn print_motion(doc: &Document, motion: &Motion) {
    println!("jump\t{}\t{}", position(doc, motion.caret), motion.caret);
    if let Some(selection) = &motion.selection {
        println!("select\t{}..{}", selection.start, selection.end);
    }
}

/// 1-based `line:column` of a char offset.
fn position(doc: &Document, offset: usize) -> String {
    let rope = doc.rope();
    let offset = offset.min(rope.len_chars());
    let line = rope.char_to_line(offset);
    let col = offset - rope.line_to_char(line);
    format!("{}:{}", line + 1, col + 1)
}
