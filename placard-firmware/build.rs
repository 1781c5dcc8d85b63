//! Build script for placard-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates placard.toml and generates `board_config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let board = validate_config();
    generate_board_config(&board);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated board settings
struct Board {
    baud: u32,
    columns: u8,
    rows: u8,
    scroll_step_ms: u32,
    inter_slot_pause_ms: u32,
    idle_poll_ms: u32,
    instant_timeout_s: u16,
    dimmest_above: u16,
    dim_above: u16,
    bright_above: u16,
}

/// Validate placard.toml at compile time
fn validate_config() -> Board {
    println!("cargo:rerun-if-changed=placard.toml");

    let config_path = Path::new("placard.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: placard.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a placard.toml board configuration.       ║\n\
            ║  Please create one in the placard-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read placard.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in placard.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let mut field = |section: &str, key: &str, min: i64, max: i64| -> i64 {
        match config.get(section).and_then(|s| s.get(key)) {
            Some(toml::Value::Integer(value)) if (min..=max).contains(value) => *value,
            Some(toml::Value::Integer(_)) => {
                errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
                min
            }
            Some(_) => {
                errors.push(format!("[{}] {} must be an integer", section, key));
                min
            }
            None => {
                errors.push(format!("[{}] missing '{}'", section, key));
                min
            }
        }
    };

    let board = Board {
        baud: field("serial", "baud", 300, 921_600) as u32,
        // The renderer supports up to 40 columns; the VFD driver up to 4 rows
        columns: field("display", "columns", 8, 40) as u8,
        rows: field("display", "rows", 1, 4) as u8,
        scroll_step_ms: field("display", "scroll_step_ms", 10, 2_000) as u32,
        inter_slot_pause_ms: field("schedule", "inter_slot_pause_ms", 0, 10_000) as u32,
        idle_poll_ms: field("schedule", "idle_poll_ms", 10, 60_000) as u32,
        instant_timeout_s: field("instant", "timeout_s", 1, 3_600) as u16,
        dimmest_above: field("brightness", "dimmest_above", 0, 1023) as u16,
        dim_above: field("brightness", "dim_above", 0, 1023) as u16,
        bright_above: field("brightness", "bright_above", 0, 1023) as u16,
    };

    if !(board.dimmest_above > board.dim_above && board.dim_above > board.bright_above) {
        errors.push(
            "[brightness] thresholds must descend: dimmest_above > dim_above > bright_above"
                .to_string(),
        );
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration in placard.toml              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=placard.toml validated successfully");
    board
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `board_config.rs` into OUT_DIR
fn generate_board_config(board: &Board) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let source = format!(
        "// Generated by build.rs from placard.toml\n\
         \n\
         pub const SERIAL_BAUD: u32 = {baud};\n\
         pub const DISPLAY_COLS: u8 = {columns};\n\
         pub const DISPLAY_ROWS: u8 = {rows};\n\
         \n\
         pub const TUNABLES: Tunables = Tunables {{\n\
         \x20   scroll_step_ms: {scroll},\n\
         \x20   inter_slot_pause_ms: {pause},\n\
         \x20   instant_timeout_s: {instant},\n\
         \x20   idle_poll_ms: {idle},\n\
         }};\n\
         \n\
         pub const BRIGHTNESS: BrightnessThresholds = BrightnessThresholds {{\n\
         \x20   dimmest_above: {dimmest},\n\
         \x20   dim_above: {dim},\n\
         \x20   bright_above: {bright},\n\
         }};\n",
        baud = board.baud,
        columns = board.columns,
        rows = board.rows,
        scroll = board.scroll_step_ms,
        pause = board.inter_slot_pause_ms,
        instant = board.instant_timeout_s,
        idle = board.idle_poll_ms,
        dimmest = board.dimmest_above,
        dim = board.dim_above,
        bright = board.bright_above,
    );
    fs::write(out_dir.join("board_config.rs"), source).unwrap();
}
