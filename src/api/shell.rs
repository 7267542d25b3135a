//! Interactive line shell driving one [`PageDispatcher`] session.
//!
//! Commands: `pages`, `use <page>`, `fields`, `set NAME=VALUE`, `reset`,
//! `predict`, `help`, `quit`. Values typed on a page start from the form
//! defaults and are cleared when the page changes.

use std::io::{self, BufRead, Write};

use crate::features::catalog::DISCLAIMER;
use crate::features::domain::{DiseaseKind, DomainSpec, FieldValue, Values};
use crate::features::service::default_values;
use crate::inference::dispatch::PageDispatcher;
use crate::inference::domain::PredictionOutcome;
use crate::inference::service::InferenceService;

const HELP: &str = "\
commands:
  pages               list the prediction pages
  use <page>          switch page (e.g. `use heart_disease`)
  fields              show the current page's fields and values
  set NAME=VALUE      change one field
  reset               restore the form defaults
  predict             run the prediction for the current page
  help                show this text
  quit                leave the shell";

/// Session state: the selected page plus the values typed on it.
pub struct Shell<'a> {
    service: &'a InferenceService,
    dispatcher: PageDispatcher,
    values: Values,
}

impl<'a> Shell<'a> {
    pub fn new(service: &'a InferenceService) -> Self {
        let dispatcher = PageDispatcher::new();
        Self {
            service,
            values: default_values(dispatcher.selected()),
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &PageDispatcher {
        &self.dispatcher
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "{DISCLAIMER}")?;
        self.print_page(&mut out)?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !self.execute(line, &mut out)? {
                break;
            }
        }
        Ok(())
    }

    /// Run one command; returns `false` when the session should end.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => return Ok(false),
            "help" => writeln!(out, "{HELP}")?,
            "pages" => {
                for kind in DiseaseKind::ALL {
                    let marker = if kind == self.dispatcher.selected() { '*' } else { ' ' };
                    writeln!(out, "{marker} {:<14} {}", kind.as_str(), kind.spec().title)?;
                }
            }
            "use" => match self.dispatcher.select_by_name(arg) {
                Ok(kind) => {
                    self.values = default_values(kind);
                    self.print_page(out)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            "fields" => print_fields(self.dispatcher.page(), &self.values, out)?,
            "set" => match arg.split_once('=') {
                Some((name, value)) => {
                    let name = name.trim();
                    if self.dispatcher.page().field(name).is_some() {
                        self.values
                            .insert(name.to_string(), FieldValue::from(value.trim()));
                    } else {
                        writeln!(out, "error: `{name}` is not a field of this page")?;
                    }
                }
                None => writeln!(out, "error: expected NAME=VALUE")?,
            },
            "reset" => self.values = default_values(self.dispatcher.selected()),
            "predict" => match self.dispatcher.submit(self.service, &self.values) {
                Ok(prediction) => {
                    let marker = match prediction.outcome {
                        PredictionOutcome::Positive => "!",
                        PredictionOutcome::Negative => "+",
                    };
                    writeln!(out, "[{marker}] {}", prediction.label)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            other => writeln!(out, "error: unknown command `{other}` (try `help`)")?,
        }
        Ok(true)
    }

    fn print_page<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let page = self.dispatcher.page();
        writeln!(out, "== {} ==", page.title)?;
        writeln!(out, "{}", page.subtitle)
    }
}

/// Print the field table with the current (or default) values.
pub fn print_fields<W: Write>(spec: &DomainSpec, values: &Values, out: &mut W) -> io::Result<()> {
    for field in spec.fields {
        let current = values
            .get(field.name)
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>2}  {:<26} {:>10}   [{} .. {}]  {}",
            field.position, field.name, current, field.min, field.max, field.label
        )?;
    }
    Ok(())
}
