//! Sample command handlers for the demo dictionary.
//!
//! Handlers receive raw text tokens and do their own arity and value checks.

use ucmd_core::CmdError;

/// Exact arity check shared by the handlers below.
fn expect_args(args: &[&str], n: usize) -> Result<(), CmdError> {
    match args.len() {
        len if len < n => Err(CmdError::TooFewArgs),
        len if len > n => Err(CmdError::TooManyArgs),
        _ => Ok(()),
    }
}

fn parse_num<T: core::str::FromStr>(s: &str) -> Result<T, CmdError> {
    s.parse::<T>().map_err(|_| CmdError::InvalidArg)
}

fn parse_onoff(s: &str) -> Result<bool, CmdError> {
    match s {
        "1" | "on" | "ON" | "true" => Ok(true),
        "0" | "off" | "OFF" | "false" => Ok(false),
        _ => Err(CmdError::InvalidArg),
    }
}

/// `led <on|off>`
pub fn led(args: &[&str]) -> Result<(), CmdError> {
    expect_args(args, 1)?;
    if parse_onoff(args[0])? {
        println!("led | ON");
    } else {
        println!("led | OFF");
    }
    Ok(())
}

/// `add <i32> <i32>`
pub fn add(args: &[&str]) -> Result<(), CmdError> {
    expect_args(args, 2)?;
    let a: i32 = parse_num(args[0])?;
    let b: i32 = parse_num(args[1])?;
    let sum = a.checked_add(b).ok_or(CmdError::InvalidArg)?;
    println!("add | {} + {} = {}", a, b, sum);
    Ok(())
}

/// `baud <u32>`, accepting only the usual UART rates.
pub fn baud(args: &[&str]) -> Result<(), CmdError> {
    const RATES: [u32; 6] = [9600, 19200, 38400, 57600, 115200, 230400];
    expect_args(args, 1)?;
    let rate: u32 = parse_num(args[0])?;
    if !RATES.contains(&rate) {
        return Err(CmdError::InvalidArg);
    }
    println!("baud | {}", rate);
    Ok(())
}

/// `reboot`, no arguments.
pub fn reboot(args: &[&str]) -> Result<(), CmdError> {
    expect_args(args, 0)?;
    println!("reboot | scheduled");
    Ok(())
}

/// `echo [args...]`: prints each token in brackets, empty ones included.
pub fn echo_args(args: &[&str]) -> Result<(), CmdError> {
    print!("echo | {} args:", args.len());
    for arg in args {
        print!(" [{}]", arg);
    }
    println!();
    Ok(())
}
