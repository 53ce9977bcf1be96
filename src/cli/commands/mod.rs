use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("hosts")
                .help("hosts to inspect, <host>[:<port>], port defaults to 443")
                .num_args(1..)
                .required(true)
                .value_name("HOST[:PORT]"),
        )
        .arg(
            Arg::new("format")
                .default_value("plain")
                .env("CERTINFO_FORMAT")
                .help("output format: plain, markdown, json")
                .long("format")
                .short('f')
                .value_name("FORMAT")
                .value_parser(["plain", "markdown", "json"]),
        )
        .arg(
            Arg::new("skip-verify")
                .action(ArgAction::SetTrue)
                .env("CERTINFO_SKIP_VERIFY")
                .help("accept any certificate the server presents")
                .long("skip-verify")
                .long_help(
                    "Accept any certificate the server presents.\n\n\
                    The TLS handshake still completes, but the chain and host name are not\n\
                    verified. Use it to read self-signed, expired or mismatched certificates.",
                )
                .short('k'),
        )
        .arg(
            Arg::new("utc")
                .action(ArgAction::SetTrue)
                .env("CERTINFO_UTC")
                .help("print validity dates in UTC instead of local time")
                .long("utc")
                .short('u'),
        )
        .arg(
            Arg::new("timeout")
                .default_value("3")
                .env("CERTINFO_TIMEOUT")
                .help("number of seconds allowed to connect and complete the TLS handshake")
                .long("timeout")
                .short('t')
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("template")
                .env("CERTINFO_TEMPLATE")
                .help("template file, or inline template, for the plain output")
                .long("template")
                .long_help(
                    "Handlebars template used for the plain output.\n\n\
                    The value is read as a file path first; when no such file exists the\n\
                    value itself is used as the template. The template receives the list\n\
                    of records, e.g.:\n\n\
                    {{#each this}}{{domainName}} {{notAfter}}\\n{{/each}}",
                )
                .short('T')
                .value_name("PATH|TEMPLATE"),
        )
        .arg(
            Arg::new("verbose")
                .action(ArgAction::Count)
                .help("increase log verbosity (-v, -vv, -vvv)")
                .long("verbose")
                .short('v'),
        )
}
