/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("psdoc")
        .about("Print the structure of Photoshop documents")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from")
            .long("input")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help_heading("OUTPUT")
            .help("Print the decoded document as JSON")
            .long_help("Print every decoded document as pretty printed JSON instead of a summary.\nOffsets in the output are absolute byte offsets into the file."))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Treat every warning as an error")
            .long_help("Abort decoding on advisory problems, e.g. a resource block without the 8BIM signature\nor color mode data in an RGB document, instead of recording them as warnings."))
        .arg(Arg::new("max-layers")
            .long("max-layers")
            .help_heading("ADVANCED")
            .help("Maximum number of layers to decode")
            .value_parser(value_parser!(usize))
            .default_value("32767"))
        .arg(Arg::new("max-resources")
            .long("max-resources")
            .help_heading("ADVANCED")
            .help("Maximum number of image resource blocks to decode")
            .value_parser(value_parser!(usize))
            .default_value("65536"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum document width")
            .value_parser(value_parser!(usize))
            .default_value("300000"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum document height")
            .value_parser(value_parser!(usize))
            .default_value("300000"))
}
