use class2src::jvm::model::Class;
use class2src::*;

use clap::{value_parser, Arg, ArgAction, Command};
use std::io;
use std::path::PathBuf;

fn main() -> Result<(), jvm::Error> {
    env_logger::init();

    let matches = Command::new("Class file inspector")
        .version(clap::crate_version!())
        .author("Alec Theriault <alec.theriault@gmail.com>")
        .about("Decode a JVM class file and print its members as Java-like source")
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Reject `Deprecated`/`Synthetic` attributes with a non-zero length"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of spaces per level of indentation (default: 5)"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input class file to use")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .get_matches();

    let mut settings = Settings::new();
    settings.strict_attribute_lengths = matches.get_flag("strict");
    if let Some(width) = matches.get_one::<usize>("indent") {
        settings = settings.with_indent_width(*width);
    }

    let class_file = matches
        .get_one::<PathBuf>("INPUT")
        .ok_or_else(|| jvm::Error::IoError(io::Error::from(io::ErrorKind::InvalidInput)))?;
    log::info!("Reading '{}'", class_file.display());
    let class = Class::read_from_path(class_file, &settings)?;
    log::info!(
        "Read {} ({} fields, {} methods)",
        &class.this_class,
        class.fields.len(),
        class.methods.len()
    );

    print!("{}", describe_class(&class, &settings));
    Ok(())
}

/// Java-like outline of the class: header, field declarations, and method signatures along with
/// a summary of their `Code` attribute
fn describe_class(class: &Class, settings: &Settings) -> String {
    let unit = settings.indent_unit.as_str();
    let mut output = String::new();

    if let Some(source_file) = &class.source_file {
        output.push_str(&format!("// Compiled from {}\n", source_file));
    }
    output.push_str(&format!("// Class file version {}\n", class.version));
    if class.deprecated {
        output.push_str("@Deprecated\n");
    }
    output.push_str(&class.declaration());
    output.push_str(" {\n");

    for field in &class.fields {
        output.push_str(&format!("{}{}\n", unit, field.declaration()));
    }

    for method in &class.methods {
        output.push('\n');
        output.push_str(&format!("{}{}", unit, method.signature()));
        let code = match &method.code {
            None => {
                output.push_str(";\n");
                continue;
            }
            Some(code) => code,
        };
        output.push_str(" {\n");
        output.push_str(&format!(
            "{}{}// max_stack = {}, max_locals = {}, {} bytes of bytecode\n",
            unit,
            unit,
            method.max_stack,
            method.max_locals,
            code.len()
        ));
        for handler in &method.exception_handlers {
            output.push_str(&format!(
                "{}{}// [{}, {}) -> {} catches {}\n",
                unit, unit, handler.start_pc, handler.end_pc, handler.handler_pc, handler.catch_type
            ));
        }
        output.push_str(&format!("{}}}\n", unit));
    }

    output.push_str("}\n");
    output
}
