use crate::transfer::{MULTIPART_THRESHOLD, PART_SIZE};
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
    value_parser,
};
use std::path::{Path, PathBuf};

pub fn new(config_file_path: &Path) -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("osscli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage buckets and objects in S3 compatible object storage")
        .color(ColorChoice::Auto)
        .styles(styles)
        .after_help(
            "Methods:\n  \
             create                  create the bucket (private)\n  \
             head                    list all the objects in the bucket\n  \
             get <key> <file>        download an object\n  \
             put <key> <file>        upload a file, in parts when it reaches the threshold\n  \
             delete <key>...         delete objects\n  \
             exists <key>...         check if objects exist (alias: ping)\n  \
             find <prefix>           list the objects under a prefix (alias: prefix)",
        )
        .arg(
            Arg::new("config")
            .long("config")
            .short('c')
            .help("Config file path")
            .default_value(config_file_path.as_os_str().to_owned())
            .env("OSSCLI_CONFIG")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .num_args(1)
        )
        .arg(
            Arg::new("bucket")
            .long("bucket")
            .short('b')
            .help("Bucket name")
            .required(true)
            .value_name("NAME")
            .num_args(1)
        )
        .arg(
            Arg::new("part-size")
            .long("part-size")
            .help("Part size in bytes for multipart uploads")
            .default_value(PART_SIZE.to_string())
            .value_parser(value_parser!(u64).range(1..))
            .num_args(1)
        )
        .arg(
            Arg::new("threshold")
            .long("threshold")
            .help("Files of this size in bytes or bigger are uploaded in parts")
            .default_value(MULTIPART_THRESHOLD.to_string())
            .value_parser(value_parser!(u64).range(1..))
            .num_args(1)
        )
        .arg(
            Arg::new("quiet")
            .long("quiet")
            .short('q')
            .help("Don't show progress bar")
            .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Verbosity level")
            .action(ArgAction::Count)
        )
        .arg(
            Arg::new("method")
            .help("create, head, get, put, delete, exists, find")
            .required(true)
            .index(1)
        )
        .arg(
            Arg::new("operands")
            .help("Object keys and local files, depends on the method")
            .index(2)
            .num_args(0..)
            .allow_hyphen_values(true)
        )
}
