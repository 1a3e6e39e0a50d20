/// Interactive Unitel disk console application

use unitel::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// Console commands with their usage and description
const COMMANDS: &[(&str, &str, &str)] = &[
    ("open", "open <path>", "Open a disk image file (quote paths with spaces)"),
    ("info", "info", "Show volume label and error map"),
    ("dir", "dir", "List data sets"),
    ("read", "read <name>", "Read and hex dump a data set"),
    ("export", "export <name> [path]", "Export a data set to the host filesystem"),
    ("catalog", "catalog", "List videotex pages of the FICMAC catalog"),
    ("page", "page <n>", "Hex dump a videotex page (from 1)"),
    ("sector", "sector <track> <sector>", "Read and display a sector"),
    ("layout", "layout [path]", "Show or load the FICMAC screen layout"),
    ("table", "table <path>", "Load a 256-byte transcoding table"),
    ("help", "help", "Show this help"),
    ("quit", "quit, exit", "Exit"),
    ("exit", "", ""),
];

/// Completes command names from the command table
struct CommandCompleter;

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the first word (command name)
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = COMMANDS
            .iter()
            .filter(|(name, _, _)| name.starts_with(&prefix))
            .map(|(name, usage, _)| Pair {
                display: if usage.is_empty() { name } else { usage }.to_string(),
                replacement: name.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Get the path to the history file
fn history_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".unitel_history");
        p
    })
}

/// Settings applied to the next `open`
struct Settings {
    catalog_layout: CatalogLayout,
    transcoder: Transcoder,
}

impl Settings {
    fn builder(&self) -> DiskImageBuilder {
        DiskImage::builder()
            .catalog_layout(self.catalog_layout.clone())
            .transcoder(self.transcoder.clone())
    }
}

fn main() {
    env_logger::init();

    println!("=== Unitel ===");
    println!("Interactive console for exploring Unitel videotex disk images.");
    println!("Type 'help' for available commands\n");

    let mut rl: Editor<CommandCompleter, _> = match Editor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create editor: {}", e);
            std::process::exit(1);
        }
    };
    rl.set_helper(Some(CommandCompleter));

    if let Some(history_path) = history_path() {
        let _ = rl.load_history(&history_path);
    }

    let mut image: Option<DiskImage> = None;
    let mut settings = Settings {
        catalog_layout: CatalogLayout::default(),
        transcoder: Transcoder::ebcdic(),
    };

    // An image path on the command line is opened right away
    if let Some(path) = std::env::args().nth(1) {
        open_image(&path, &settings, &mut image);
    }

    loop {
        let input = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                if let Some(history_path) = history_path() {
                    let _ = rl.save_history(&history_path);
                }
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let _ = rl.add_history_entry(input);

        let parts = parse_command_line(input);
        if parts.is_empty() {
            continue;
        }
        let command = parts[0].to_lowercase();

        match command.as_str() {
            "help" => print_help(),
            "quit" | "exit" => {
                if let Some(history_path) = history_path() {
                    let _ = rl.save_history(&history_path);
                }
                println!("Goodbye!");
                break;
            }
            "open" => {
                if parts.len() < 2 {
                    println!("Usage: open <path>");
                    continue;
                }
                open_image(&parts[1], &settings, &mut image);
            }
            "layout" => {
                if parts.len() < 2 {
                    print_layout(&settings.catalog_layout);
                    continue;
                }
                match CatalogLayout::from_file(&parts[1]) {
                    Ok(layout) => {
                        print_layout(&layout);
                        settings.catalog_layout = layout;
                        println!("Layout applies to the next open");
                    }
                    Err(e) => print_error(&e),
                }
            }
            "table" => {
                if parts.len() < 2 {
                    println!("Usage: table <path>");
                    continue;
                }
                match Transcoder::from_file(&parts[1]) {
                    Ok(transcoder) => {
                        settings.transcoder = transcoder;
                        println!("Transcoding table applies to the next open");
                    }
                    Err(e) => print_error(&e),
                }
            }
            _ if !is_disk_command(&command) => {
                println!("Unknown command: {}. Type 'help' for available commands.", command);
            }
            _ => match image {
                Some(ref img) => {
                    if let Err(e) = run_disk_command(img, &command, &parts) {
                        print_error(&e);
                    }
                }
                None => println!("No image loaded"),
            },
        }
    }
}

fn is_disk_command(command: &str) -> bool {
    matches!(
        command,
        "info" | "dir" | "read" | "export" | "catalog" | "page" | "sector"
    )
}

/// Run a command that needs a loaded image
fn run_disk_command(image: &DiskImage, command: &str, parts: &[String]) -> Result<()> {
    match command {
        "info" => print_info(image)?,
        "dir" => print_dir(image),
        "read" => {
            if parts.len() < 2 {
                println!("Usage: read <name>");
                return Ok(());
            }
            let data = image.get_file(&parts[1])?;
            println!("{} ({} bytes):", parts[1], data.len());
            print_hex_dump(data, 2048);
        }
        "export" => {
            if parts.len() < 2 {
                println!("Usage: export <name> [output_path]");
                println!("  output_path defaults to the data set name");
                return Ok(());
            }
            let data = image.get_file(&parts[1])?;
            let output = parts.get(2).unwrap_or(&parts[1]);
            std::fs::write(output, data)?;
            println!("Exported {} bytes to {}", data.len(), output);
        }
        "catalog" => {
            let pages = image.catalog()?;
            if pages.is_empty() {
                println!("No pages");
            }
            for (i, page) in pages.iter().enumerate() {
                println!(
                    "{:3}  {}  {:5}  {:#07X}  {:5} bytes",
                    i + 1,
                    page.offset.to_unitel(),
                    page.offset.to_string(),
                    page.offset.offset(),
                    page.length
                );
            }
        }
        "page" => {
            let pages = image.catalog()?;
            let Some(index) = parts.get(1).and_then(|s| s.parse::<usize>().ok()) else {
                println!("Usage: page <n>  (1 to {})", pages.len());
                return Ok(());
            };
            match index.checked_sub(1).and_then(|i| pages.get(i)) {
                Some(page) => {
                    let data = image.page(page)?;
                    println!("Page {} at {} ({} bytes):", index, page.offset, data.len());
                    print_hex_dump(data, usize::MAX);
                }
                None => println!("No page {} (1 to {})", index, pages.len()),
            }
        }
        "sector" => {
            let track = parts.get(1).and_then(|s| parse_hex_or_dec(s));
            let sector = parts.get(2).and_then(|s| parse_hex_or_dec(s));
            let (Some(track), Some(sector)) = (track, sector) else {
                println!("Usage: sector <track> <sector>");
                return Ok(());
            };
            let data = image.read_sector(track, sector)?;
            println!("Track {}, sector {}:", track, sector);
            print_hex_dump(data, usize::MAX);
        }
        _ => {}
    }
    Ok(())
}

fn open_image(path: &str, settings: &Settings, image: &mut Option<DiskImage>) {
    match io::read_image(path, settings.builder()) {
        Ok(img) => {
            println!("Opened: {}", path);
            *image = Some(img);
        }
        Err(e) => print_error(&e),
    }
}

fn print_error(error: &UnitelError) {
    println!("Error ({:?}): {}", error.kind(), error);
}

/// Split a command line into words, keeping quoted paths together
fn parse_command_line(input: &str) -> Vec<String> {
    input
        .split('"')
        .enumerate()
        .flat_map(|(i, chunk)| {
            // Odd chunks were between quotes
            if i % 2 == 1 {
                vec![chunk.to_string()]
            } else {
                chunk.split_whitespace().map(str::to_string).collect()
            }
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn print_help() {
    println!("Available commands:");
    for (_, usage, description) in COMMANDS.iter().filter(|(_, usage, _)| !usage.is_empty()) {
        println!("  {:<24} - {}", usage, description);
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn print_info(image: &DiskImage) -> Result<()> {
    let volume = image.diskinfo()?;
    println!("Volume label: {}", volume.label);
    println!("Locked: {}", yes_no(volume.locked));
    println!("Owner: {}", volume.owner);
    println!("Sides: {}", volume.sides);
    println!("Double density: {}", yes_no(volume.double_density));
    println!("Bytes per sector: {}", volume.bytes_per_sector);
    println!("Sector sequence: {}", volume.sector_sequence);
    println!(
        "Label standard: {}",
        if volume.label_standard { "IBM" } else { "not IBM" }
    );

    let error_map = image.error_map()?;
    let track = |t: Option<usize>| t.map_or("none".to_string(), |t| t.to_string());
    println!(
        "Defective tracks: {}, {}",
        track(error_map.first_defective_track),
        track(error_map.second_defective_track)
    );
    println!("Defective records: {}", yes_no(error_map.defective_record));

    let geometry = image.geometry();
    println!(
        "Geometry: {} tracks, {} sectors, {} bytes ({} KB)",
        geometry.tracks_per_side(),
        geometry.sectors_per_track(),
        geometry.bytes_per_sector(),
        image.spec().total_capacity_kb()
    );
    Ok(())
}

fn print_dir(image: &DiskImage) {
    let entries = image.dir();
    if entries.is_empty() {
        println!("No data sets");
        return;
    }

    println!(
        "{:<17} {:>5}/{:<5} {:>7} {:>7}/{:<7} {:<4} {:<4} {:<4}",
        "Identifier", "Block", "Phys", "Begin", "End", "Data", "Rstr", "Prot", "Byps"
    );
    for entry in entries {
        println!(
            "{:<17} {:>5}/{:<5} {:>7X} {:>7X}/{:<7X} {:<4} {:<4} {:<4}",
            entry.identifier,
            entry.block_length,
            entry.physical_record_length,
            entry.beginning_of_extent.offset(),
            entry.end_of_extent.offset(),
            entry.end_of_data.offset(),
            yes_no(entry.restricted),
            yes_no(entry.write_protect),
            yes_no(entry.bypass)
        );
    }
}

fn print_layout(layout: &CatalogLayout) {
    for (i, screen) in layout.screens().iter().enumerate() {
        println!(
            "Screen {}: offset {:#06X}, {} slots",
            i + 1,
            screen.offset,
            screen.count
        );
    }
}

fn print_hex_dump(data: &[u8], max_bytes: usize) {
    let len = data.len().min(max_bytes);

    for (i, chunk) in data[..len].chunks(16).enumerate() {
        println!("{}", hex_dump_row(i * 16, chunk));
    }

    if data.len() > max_bytes {
        println!("... ({} more bytes)", data.len() - max_bytes);
    }
}

/// One dump row: address, two groups of 8 hex bytes, then the videotex text
fn hex_dump_row(address: usize, chunk: &[u8]) -> String {
    let hex: Vec<String> = (0..16)
        .map(|j| chunk.get(j).map_or("  ".to_string(), |b| format!("{:02X}", b)))
        .collect();

    // Control characters, C0 and C1, shown as dots
    let text: String = chunk
        .iter()
        .map(|&b| match b {
            0x20..=0x7E | 0xA0..=0xFF => char::from(b),
            _ => '.',
        })
        .collect();

    format!(
        "{:04X}: {}  {}  |{:<16}|",
        address,
        hex[..8].join(" "),
        hex[8..].join(" "),
        text
    )
}

fn parse_hex_or_dec(s: &str) -> Option<usize> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}
