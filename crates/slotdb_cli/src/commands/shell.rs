//! Interactive numbered menu.
//!
//! Reads one command number per line and prompts for its arguments. End of
//! input behaves like `9) quit`.

use super::record::describe;
use super::report::render;
use super::user_message;
use slotdb_core::{Record, Store};
use std::io::{self, BufRead, Write};
use tracing::debug;

const MENU: &str = "Type the number of the command to execute the command:
\t1) create new database
\t2) open database
\t3) close database
\t4) display record
\t5) update record
\t6) create report
\t7) add a record
\t8) delete a record
\t9) quit";

/// Runs the menu on stdin and stdout.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

/// Menu loop over a single store handle.
pub struct Shell<R, W> {
    input: R,
    output: W,
    store: Store,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell with a closed store.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            store: Store::new(),
        }
    }

    /// Runs until `9` or end of input. The store is closed on exit.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(selection) = self.read_line()? else {
                return self.quit();
            };

            debug!(selection = %selection, "menu selection");
            match selection.as_str() {
                "1" => self.create()?,
                "2" => self.open()?,
                "3" => self.close()?,
                "4" => self.display()?,
                "5" => self.update()?,
                "6" => self.report()?,
                "7" => self.add()?,
                "8" => self.delete()?,
                "9" => return self.quit(),
                _ => writeln!(self.output, "That is not a command")?,
            }
            writeln!(self.output)?;
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn prompt(&mut self, question: &str) -> io::Result<String> {
        writeln!(self.output, "{question}")?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn prompt_record(&mut self, verb: &str) -> io::Result<Record> {
        let id = self.prompt(&format!("Enter the id of the record you want to {verb}"))?;
        let state = self.prompt(&format!("Enter the state of the record you want to {verb}"))?;
        let city = self.prompt(&format!("Enter the city of the record you want to {verb}"))?;
        let name = self.prompt(&format!("Enter the name of the record you want to {verb}"))?;
        Ok(Record::new(id, state, city, name))
    }

    /// Prints the "open first" hint and returns false when no store is open.
    fn require_open(&mut self) -> io::Result<bool> {
        if !self.store.is_open() {
            writeln!(self.output, "Open a database first")?;
            return Ok(false);
        }
        Ok(true)
    }

    fn create(&mut self) -> io::Result<()> {
        let name = self.prompt(
            "What is the name of the database csv file? Do not include the file extension.",
        )?;
        match self.store.create(&name) {
            Ok(summary) => {
                writeln!(self.output, "Database created")?;
                writeln!(
                    self.output,
                    "{} records imported, {} skipped",
                    summary.imported,
                    summary.skipped.len()
                )
            }
            Err(err) => writeln!(self.output, "{}", user_message(&err)),
        }
    }

    fn open(&mut self) -> io::Result<()> {
        if self.store.is_open() {
            return writeln!(self.output, "Close the current database first");
        }

        let name =
            self.prompt("What is the name of the database? Do not include a file extension.")?;
        match self.store.open(&name) {
            Ok(()) => writeln!(self.output, "Database opened"),
            Err(err) => writeln!(
                self.output,
                "Could not open the database: {}",
                user_message(&err)
            ),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        match self.store.close() {
            Ok(()) => writeln!(self.output, "Database closed"),
            Err(err) => writeln!(self.output, "{}", user_message(&err)),
        }
    }

    fn display(&mut self) -> io::Result<()> {
        if !self.require_open()? {
            return Ok(());
        }

        let id = self.prompt("Enter the id of the record you want to get")?;
        match self.store.find(&id) {
            Ok(Some(found)) => writeln!(self.output, "{}", describe(&found)),
            Ok(None) => writeln!(self.output, "record not found"),
            Err(err) => writeln!(self.output, "{}", user_message(&err)),
        }
    }

    fn update(&mut self) -> io::Result<()> {
        if !self.require_open()? {
            return Ok(());
        }

        let record = self.prompt_record("update")?;
        match self.store.update(&record) {
            Ok(at) => writeln!(self.output, "Updated record {} at {at}", record.id),
            Err(err) => writeln!(self.output, "{}", user_message(&err)),
        }
    }

    fn report(&mut self) -> io::Result<()> {
        if !self.require_open()? {
            return Ok(());
        }

        match self.store.report() {
            Ok(records) => writeln!(self.output, "{}", render(&records)),
            Err(err) => writeln!(self.output, "{}", user_message(&err)),
        }
    }

    fn add(&mut self) -> io::Result<()> {
        if !self.require_open()? {
            return Ok(());
        }

        let record = self.prompt_record("add")?;
        match self.store.add(&record) {
            Ok(at) => writeln!(self.output, "Added a new record at {at}\n{record}"),
            Err(err) => writeln!(self.output, "{}", user_message(&err)),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        if !self.require_open()? {
            return Ok(());
        }

        let id = self.prompt("Enter the id of the record you want to delete")?;
        match self.store.delete(&id) {
            Ok(at) => writeln!(self.output, "Deleted record {id} at {at}"),
            Err(err) => writeln!(self.output, "{}", user_message(&err)),
        }
    }

    fn quit(&mut self) -> io::Result<()> {
        if let Err(err) = self.store.close() {
            writeln!(self.output, "{}", user_message(&err))?;
        }
        writeln!(
            self.output,
            "Goodbye! Any open database was closed just in case you forgot"
        )
    }
}
