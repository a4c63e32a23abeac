//! Build script for motortest-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates tester.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Allowed value for one key
enum Rule {
    Choice(&'static [&'static str]),
    Millis { max: i64 },
    Flag,
}

/// Every key the runtime parser accepts, per section
const SCHEMA: &[(&str, &[(&str, Rule)])] = &[
    (
        "buttons",
        &[
            ("layout", Rule::Choice(&["four", "three"])),
            ("debounce_ms", Rule::Millis { max: 500 }),
            ("long_press_ms", Rule::Millis { max: 5000 }),
        ],
    ),
    (
        "motor",
        &[
            ("enable_line", Rule::Choice(&["commanded", "observed"])),
            ("rpm_window_ms", Rule::Millis { max: 10_000 }),
        ],
    ),
    (
        "ui",
        &[
            ("speed_repeat_ms", Rule::Millis { max: 2000 }),
            ("loop_ms", Rule::Millis { max: 100 }),
            ("autotest", Rule::Flag),
        ],
    ),
];

fn validate_config() {
    println!("cargo:rerun-if-changed=tester.toml");

    let config_path = Path::new("tester.toml");
    if !config_path.exists() {
        fail(
            "tester.toml not found",
            &["The firmware embeds tester.toml; create one next to Cargo.toml.".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read tester.toml", &[e.to_string()]),
    };

    let config: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<String> = msg.lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in tester.toml", &lines);
        }
    };

    let errors = check_against_schema(&config);
    if !errors.is_empty() {
        fail("Invalid tester.toml", &errors);
    }

    println!("cargo:warning=tester.toml validated successfully");
}

fn check_against_schema(config: &toml::Table) -> Vec<String> {
    let mut errors = Vec::new();

    for (section, body) in config {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(body) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in body {
            let Some((_, rule)) = keys.iter().find(|(name, _)| *name == key.as_str()) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            if let Err(e) = check_value(rule, value) {
                errors.push(format!("[{}] {}: {}", section, key, e));
            }
        }
    }

    errors
}

fn check_value(rule: &Rule, value: &toml::Value) -> Result<(), String> {
    match rule {
        Rule::Choice(options) => match value.as_str() {
            Some(s) if options.contains(&s) => Ok(()),
            _ => Err(format!("must be one of {:?}", options)),
        },
        Rule::Millis { max } => match value.as_integer() {
            Some(ms) if (1..=*max).contains(&ms) => Ok(()),
            _ => Err(format!("must be an integer 1-{}", max)),
        },
        Rule::Flag => match value.as_bool() {
            Some(_) => Ok(()),
            None => Err("must be true or false".to_string()),
        },
    }
}

fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
