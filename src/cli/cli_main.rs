use super::cli_heat::{compare_with_series, heat_menu, solve_from_file, write_template};
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = match get_user_input() {
            // end of input
            Ok(choice) if choice.is_empty() => break,
            Ok(choice) => choice,
            Err(e) => {
                println!("Failed to read input: {}", e);
                break;
            }
        };

        match choice.trim() {
            "1" => heat_menu(),
            "2" => solve_from_file(),
            "3" => write_template(),
            "4" => compare_with_series(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - header
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - prompt
Reset (\x1b[0m)
*/
fn show_main_menu() {
    println!("\x1b[34m\n heat1d: one-dimensional heat conduction with boundary control \n\x1b[0m");
    println!("\x1b[33m1. Set up and solve a rod problem\x1b[0m");
    println!("\x1b[33m2. Solve from task file\x1b[0m");
    println!("\x1b[33m3. Generate task file template\x1b[0m");
    println!("\x1b[33m4. Finite differences vs analytical series\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

fn get_user_input() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}
