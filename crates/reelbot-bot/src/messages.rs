// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing texts.

pub const MENU_PROMPT: &str = "Please, choose command from next list:";

pub const HELLO_WORLD_REPLY: &str = "Hello to you too!";

pub const UNKNOWN_COMMAND: &str = "Unknown command!";

pub const TITLE_PROMPT: &str =
    "Enter the full title of the movie in the next message (do not write anything other than the title)";

pub const ARRIVALS_PROMPT: &str =
    "Enter how many latest releases you want to receive (maximum 50, default 10)";

pub const ARRIVALS_UNAVAILABLE: &str =
    "This command doesn't work right now. You can choose any other.";

pub const HISTORY_PROMPT: &str = "Enter how many recent requests you want to receive (maximum 10)";

pub const NOT_FOUND: [&str; 2] = ["Movie with this title not found!", "You can try again!"];

pub const TOO_AMBIGUOUS: [&str; 2] = [
    "You didn't give a very accurate name (too many coincidences)!",
    "Next time, please be as precise as possible with the title of the movie!",
];

pub const INVALID_PARAMS: &str = "Invalid parameters format!";

pub const INVALID_PARAMS_HINT: &str =
    "Send one \"Label: value\" pair per line, for example \"Genre: horror\", and a whole number for Count.";

pub const NO_MATCHES: &str = "No movies matching these parameters were found!";

pub const INVALID_HISTORY_COUNT: &str = "Invalid number! Please enter a whole number, for example 5.";

pub const ADVANCED_SEARCH_GUIDE: &str = r#"
Enter the parameters you want to search by (you can combine any parameters).

<b>The parameters can be the following:</b>
Start year: Enter any year between 1970 to 2022 to get results.
End year: Enter any year from 1970 to 2022 to get results (must be no less than start year).
Min IMDb: Enter any IMDb rating value between 0 to 10 to get results.
Max IMDb: Enter any IMDb rating value between 0 to 10 to get results (must be no less than min IMDb).
Genre: Use comma separated values to enter multiple genre eg : action, horror.
Sort: Enter values highestrated , lowestrated , latest , oldest to sort results accordingly.
Count: Enter how many movies matching the parameters you want to receive (maximum 50, default 10).

<b>The message should look like:</b>
Start year: 2000
End year: 2010
Min IMDb: 5
Max IMDb: 7
Genre: action, horror
Sort: latest
Count: 10
"#;

pub fn welcome(bot_name: &str) -> String {
    format!("Welcome to <b>{bot_name}</b> bot.\n")
}

/// Greeting for the "Hello" menu command.
pub fn hello(first_name: Option<&str>) -> String {
    format!("Hello, {}!", first_name.unwrap_or("friend"))
}

pub fn help(bot_name: &str) -> String {
    format!(
        r#"
<b>{bot_name}</b> bot is a special bot based on the following free Rapid API:
https://rapidapi.com/gox-ai-gox-ai-default/api/ott-details

This bot supports the following commands:

🎬 Film search (by title):
A command that takes the title of a movie and displays basic information about it.

🔎 Film advanced search (by params):
A command that takes various parameters such as release year, IMDb rating, genre, language etc.
and returns N movies corresponding to them.

🕒 Last arrivals:
A command that returns N latest arrivals from different platforms.

📜 History:
A command that displays the history of the last N requests.

👋 Hello:
A command that says "Hello" to the user.

📞 Help:
A command that briefly describes the bot and the available commands
"#
    )
}

/// Two-part outcome message as stored in the history log.
pub fn joined(parts: [&str; 2]) -> String {
    format!("{}\n\n{}", parts[0], parts[1])
}
