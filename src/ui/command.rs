use unsegen::input::*;

use nom::{
    bytes::complete::take_while1,
    character::complete::{alpha1, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use super::context::{Context, Mode};
use crate::calendar::{MAX_YEAR, MIN_YEAR};
use crate::error::{Error, ErrorKind};

pub type ActionResult = Result<(), Error>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

// Enough steps to cross the whole supported range.
const MAX_REPEAT: u32 = 12 * (MAX_YEAR - MIN_YEAR + 1) as u32;

fn jump_to_year(context: &mut Context, arg: &str) -> ActionResult {
    let year = match arg.parse::<i64>() {
        Ok(year) => year,
        // Too many digits for any integer type
        Err(_) if arg.bytes().all(|b| b.is_ascii_digit()) => i64::MAX,
        Err(_) => return Err(Error::new(ErrorKind::InvalidArgument, arg)),
    };

    if year < i64::from(MIN_YEAR) || year > i64::from(MAX_YEAR) {
        return Err(Error::new(
            ErrorKind::YearOutOfRange,
            &format!("year must be between {} and {}", MIN_YEAR, MAX_YEAR),
        ));
    }

    context.state.go_to_year(year as i32);
    Ok(())
}

fn next_month(context: &mut Context, n: u32) -> ActionResult {
    (0..n).for_each(|_| context.state.go_to_next_month());
    Ok(())
}

fn prev_month(context: &mut Context, n: u32) -> ActionResult {
    (0..n).for_each(|_| context.state.go_to_previous_month());
    Ok(())
}

fn next_year(context: &mut Context, n: u32) -> ActionResult {
    (0..n).for_each(|_| context.state.go_to_next_year());
    Ok(())
}

fn prev_year(context: &mut Context, n: u32) -> ActionResult {
    (0..n).for_each(|_| context.state.go_to_previous_year());
    Ok(())
}

fn today(context: &mut Context) -> ActionResult {
    let today = context.today();
    context.state.go_to_today(today);
    Ok(())
}

fn quit(context: &mut Context) -> ActionResult {
    context.quit = true;
    Ok(())
}

const COMMANDS: &[(&str, Action)] = &[
    ("year", Action::Arg(jump_to_year)),
    ("y", Action::Arg(jump_to_year)),
    ("next", Action::Repeatable(next_month)),
    ("n", Action::Repeatable(next_month)),
    ("prev", Action::Repeatable(prev_month)),
    ("p", Action::Repeatable(prev_month)),
    ("nexty", Action::Repeatable(next_year)),
    ("ny", Action::Repeatable(next_year)),
    ("prevy", Action::Repeatable(prev_year)),
    ("py", Action::Repeatable(prev_year)),
    ("today", Action::NoArg(today)),
    ("t", Action::NoArg(today)),
    ("quit", Action::NoArg(quit)),
    ("q", Action::NoArg(quit)),
];

fn match_action(name: &str) -> Option<&'static Action> {
    COMMANDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, act)| act)
}

/// A bare number, e.g. `2030`.
fn year_jump(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(space0, digit1, space0))(input)
}

/// `[count]name [arg]`, e.g. `3next` or `year 2030`.
fn action(input: &str) -> IResult<&str, (Option<u32>, &str, Option<&str>)> {
    all_consuming(delimited(
        space0,
        tuple((
            opt(map_res(digit1, |s: &str| s.parse::<u32>())),
            alpha1,
            opt(preceded(space1, take_while1(|c: char| !c.is_whitespace()))),
        )),
        space0,
    ))(input)
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> ActionResult {
        if let Ok((_, year)) = year_jump(cmd) {
            return jump_to_year(self.context, year);
        }

        let (_, (count, name, arg)) =
            action(cmd).map_err(|_| Error::new(ErrorKind::UnknownCommand, cmd.trim()))?;

        let act = match_action(name).ok_or_else(|| Error::new(ErrorKind::UnknownCommand, name))?;

        match (act, count, arg) {
            (Action::Repeatable(a), count, None) => {
                a(self.context, count.unwrap_or(1).min(MAX_REPEAT))
            }
            (Action::NoArg(a), None, None) => a(self.context),
            (Action::Arg(a), None, Some(arg)) => a(self.context, arg),
            _ => Err(Error::new(ErrorKind::InvalidArgument, cmd.trim())),
        }
    }

    fn report_error(&mut self, error: Error) {
        log::debug!("command failed: {}", error);
        self.context.last_error_message = Some(format!("{}", error));
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            match key {
                Key::Char('\n') => {
                    let cmd = self.context.input_sink_mut().finish_line().to_owned();
                    if cmd.trim().is_empty() {
                        self.context.mode = Mode::Normal;
                    } else if let Err(e) = self.run_command(&cmd) {
                        self.report_error(e);
                    } else {
                        self.context.last_error_message = None;
                        self.context.mode = Mode::Normal;
                    }
                    None
                }
                _ => Some(input),
            }
        } else {
            Some(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DisplayedMonth;
    use crate::clock::FixedClock;
    use chrono::{Month, NaiveDate};

    fn context() -> Context {
        Context::new(Box::new(FixedClock(
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        )))
    }

    fn displayed(c: &Context) -> DisplayedMonth {
        c.state.displayed()
    }

    #[test]
    fn bare_year_jumps_and_keeps_month() {
        let mut c = context();
        CommandParser::new(&mut c).run_command("2030").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::February, 2030));

        CommandParser::new(&mut c).run_command(" year 1985 ").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::February, 1985));

        CommandParser::new(&mut c).run_command("y 9999").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::February, 9999));
    }

    #[test]
    fn out_of_range_year_is_reported() {
        let mut c = context();
        let err = CommandParser::new(&mut c).run_command("1969").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::YearOutOfRange));
        assert!(CommandParser::new(&mut c).run_command("year 10000").is_err());
        assert!(CommandParser::new(&mut c).run_command("year abc").is_err());
        for huge in ["99999999999", "y 99999999999999999999999"] {
            let err = CommandParser::new(&mut c).run_command(huge).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::YearOutOfRange), "{}", huge);
        }
        let err = CommandParser::new(&mut c).run_command("y -5").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::YearOutOfRange));
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::February, 2024));
    }

    #[test]
    fn repeatable_navigation() {
        let mut c = context();
        CommandParser::new(&mut c).run_command("3next").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::May, 2024));

        CommandParser::new(&mut c).run_command("p").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::April, 2024));

        CommandParser::new(&mut c).run_command("2ny").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::April, 2026));

        CommandParser::new(&mut c).run_command("prevy").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::April, 2025));

        CommandParser::new(&mut c).run_command("today").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::February, 2024));

        CommandParser::new(&mut c).run_command("n").unwrap();
        CommandParser::new(&mut c).run_command("py").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::March, 2023));

        CommandParser::new(&mut c).run_command("t").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::February, 2024));
    }

    #[test]
    fn large_counts_saturate() {
        let mut c = context();
        CommandParser::new(&mut c).run_command("4000000000prev").unwrap();
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::January, MIN_YEAR));
    }

    #[test]
    fn malformed_commands() {
        let mut c = context();
        for cmd in ["sideways", "3today", "next 5", "year", "y 2030 2031", "-3next"] {
            assert!(
                CommandParser::new(&mut c).run_command(cmd).is_err(),
                "'{}' should fail",
                cmd
            );
        }
        assert_eq!(displayed(&c), DisplayedMonth::new(Month::February, 2024));
    }

    #[test]
    fn quit() {
        let mut c = context();
        CommandParser::new(&mut c).run_command("q").unwrap();
        assert!(c.quit);
    }
}
