use std::process::ExitCode;

use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use crossmark_core::Rect;
use serde::Serialize;

#[derive(Args)]
pub struct ListArgs {
    /// Only show windows whose title contains this text
    filter: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// One row of the listing.
#[derive(Debug, Serialize)]
struct ListedWindow {
    handle: String,
    title: String,
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    minimized: bool,
}

#[cfg_attr(not(windows), allow(dead_code))]
impl ListedWindow {
    fn new(handle: usize, title: String, rect: Rect, minimized: bool) -> Self {
        Self {
            handle: format!("0x{handle:X}"),
            title,
            left: rect.left,
            top: rect.top,
            width: rect.width(),
            height: rect.height(),
            minimized,
        }
    }
}

#[cfg_attr(not(windows), allow(dead_code))]
fn render_table(windows: &[ListedWindow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("Title"),
            Cell::new("X").set_alignment(CellAlignment::Right),
            Cell::new("Y").set_alignment(CellAlignment::Right),
            Cell::new("Width").set_alignment(CellAlignment::Right),
            Cell::new("Height").set_alignment(CellAlignment::Right),
            Cell::new("Minimized"),
        ]);

    for window in windows {
        table.add_row(vec![
            Cell::new(&window.handle),
            Cell::new(&window.title),
            Cell::new(window.left).set_alignment(CellAlignment::Right),
            Cell::new(window.top).set_alignment(CellAlignment::Right),
            Cell::new(window.width).set_alignment(CellAlignment::Right),
            Cell::new(window.height).set_alignment(CellAlignment::Right),
            Cell::new(if window.minimized { "yes" } else { "" }),
        ]);
    }

    format!("{table}\n\n{} windows found", windows.len())
}

fn print(args: &ListArgs, windows: &[ListedWindow]) -> ExitCode {
    if !args.json {
        println!("{}", render_table(windows));
        return ExitCode::SUCCESS;
    }

    match serde_json::to_string_pretty(windows) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(windows)]
pub fn execute(args: &ListArgs) -> ExitCode {
    use crossmark_core::MatchMode;
    use crossmark_core::config::FrameMode;
    use crossmark_core::locator::title_matches;
    use crossmark_windows::Window;

    let windows = match crossmark_windows::enumerate_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let listed: Vec<ListedWindow> = windows
        .into_iter()
        .filter(|info| info.visible && !info.title.is_empty())
        .filter(|info| {
            args.filter
                .as_deref()
                .is_none_or(|filter| title_matches(&info.title, filter, MatchMode::Substring))
        })
        .map(|info| {
            let window = Window::from_raw(info.handle);
            let rect = window
                .rect(FrameMode::Window)
                .unwrap_or(Rect::new(0, 0, 0, 0));
            ListedWindow::new(info.handle, info.title, rect, window.is_minimized())
        })
        .collect();

    print(args, &listed)
}

#[cfg(not(windows))]
pub fn execute(args: &ListArgs) -> ExitCode {
    if args.json {
        return print(args, &[]);
    }
    eprintln!("Error: window listing is only supported on Windows.");
    ExitCode::FAILURE
}
