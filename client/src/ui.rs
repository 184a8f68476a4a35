//! Terminal front end: a filterable listing, a two-field submission form
//! and y/N confirmation prompts over stdin.

use std::io::{self, Write};

use crate::{
    api::RemotePersons,
    app::{Confirm, Phonebook},
    notification::Severity,
    service::PersonService,
};

pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        matches!(ask(&format!("{prompt} [y/N] ")).as_str(), "y" | "Y" | "yes")
    }
}

pub async fn run(server: &str) {
    let mut phonebook = Phonebook::new(RemotePersons::new(server));

    if let Err(error) = phonebook.refresh().await {
        eprintln!("Could not fetch phonebook from {server}: {error}");
    }

    let mut confirm = StdinConfirm;

    println!("Phonebook. Commands: all, find <text>, add, rm <id>, quit");

    loop {
        render(&phonebook);

        let line = ask("> ");
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line.as_str(), ""),
        };

        match command {
            "all" => phonebook.search.clear(),
            "find" => phonebook.search = rest.to_string(),
            "add" => {
                phonebook.new_name = ask("name: ");
                phonebook.new_number = ask("number: ");
                phonebook.submit(&mut confirm).await;
            }
            "rm" => phonebook.delete(rest, &mut confirm).await,
            "quit" | "exit" => break,
            "" => {}
            _ => println!("Unknown command: {command}"),
        }
    }
}

fn render<S: PersonService>(phonebook: &Phonebook<S>) {
    if let Some(notification) = phonebook.notification() {
        match notification.severity {
            Severity::Success => println!("[ok] {}", notification.message),
            Severity::Error => println!("[error] {}", notification.message),
        }
    }

    for person in phonebook.visible() {
        println!("{:>4}  {}  {}", person.id, person.name, person.number);
    }
}

fn ask(prompt: &str) -> String {
    print!("{prompt}");
    io::stdout().flush().unwrap();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
        // EOF: behave like an empty answer.
        return String::new();
    }

    line.trim().to_string()
}
