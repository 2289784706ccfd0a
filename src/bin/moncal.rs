extern crate moncal as lib;

use flexi_logger::{FileSpec, Logger};
use lib::calendar::CalendarState;
use lib::clock::{Clock, SystemClock};
use lib::events::Dispatcher;
use lib::ui::app::App;
use lib::ui::render::month_text;
use nix::sys::termios;
use std::convert::TryFrom;
use std::io::{stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

// Clicks, drags and bare motion, in SGR encoding
const MOUSE_ON: &str = "\x1b[?1000h\x1b[?1002h\x1b[?1003h\x1b[?1015h\x1b[?1006h";
const MOUSE_OFF: &str = "\x1b[?1006l\x1b[?1015l\x1b[?1003l\x1b[?1002l\x1b[?1000l";

#[derive(Debug, StructOpt)]
#[structopt(name = "moncal", about = "A month calendar for the terminal.")]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "print the current month and exit"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    if args.show {
        let today = SystemClock.today();
        print!("{}", month_text(&CalendarState::from_today(today), today));
        return Ok(());
    }

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Back to the main screen with mouse reporting off
        println!(
            "{}{}{}",
            MOUSE_OFF,
            termion::screen::ToMainScreen,
            termion::cursor::Show
        );

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("moncal ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let dispatcher = Dispatcher::from_config(&config);

    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;
    {
        let mut out = std::io::stdout();
        write!(out, "{}", MOUSE_ON)?;
        out.flush()?;
    }

    let mut app = App::new(&config, Box::new(SystemClock));
    let result = app.run(dispatcher, term);

    let mut out = std::io::stdout();
    write!(out, "{}", MOUSE_OFF)?;
    out.flush()?;

    result
}
