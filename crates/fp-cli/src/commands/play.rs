//! Interactive play: explore rooms and talk to characters.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use fp_core::{Context, Direction};
use fp_fiction::{FictionEngine, THIS_ROOM, present};

const DEFAULT_SAVE: &str = "default";

/// `~/.false_prophet`, or `.false_prophet` if there is no home directory.
pub fn default_save_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".false_prophet")
}

/// Play on stdin/stdout until the player quits or wins.
pub fn run(engine: &FictionEngine, cheat: bool, save_dir: &Path) -> Result<(), String> {
    let stdin = io::stdin();
    let mut game = Game::new(engine, cheat, save_dir, io::stdout());
    game.play(&mut stdin.lock()).map_err(|e| e.to_string())
}

enum Flow {
    Continue,
    Quit,
}

struct Game<'a, W> {
    engine: &'a FictionEngine,
    context: Context,
    cheat: bool,
    save_dir: &'a Path,
    out: W,
}

impl<'a, W: Write> Game<'a, W> {
    fn new(engine: &'a FictionEngine, cheat: bool, save_dir: &'a Path, out: W) -> Self {
        Self {
            engine,
            context: engine.default_context(),
            cheat,
            save_dir,
            out,
        }
    }

    fn play(&mut self, input: &mut impl BufRead) -> io::Result<()> {
        writeln!(self.out, "{}", self.engine.hello().trim())?;
        writeln!(self.out, "  Type 'help' for commands, 'quit' to exit.\n")?;

        let mut line = String::new();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break; // EOF
            }

            let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
            let Some((command, rest)) = words.split_first() else {
                continue;
            };
            let arg = rest.first().map(String::as_str);

            if let Flow::Quit = self.dispatch(command, arg, input)? {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        command: &str,
        arg: Option<&str>,
        input: &mut impl BufRead,
    ) -> io::Result<Flow> {
        match (command, arg) {
            ("q" | "quit", _) => return Ok(Flow::Quit),
            ("h" | "help", _) => self.help()?,
            ("l" | "look", thing) => self.look(thing)?,
            ("t" | "talk" | "u" | "use", Some(name)) => return self.talk(name, input),
            ("i" | "inventory", _) => {
                let text = self.engine.inventory(&self.context);
                writeln!(self.out, "{text}")?;
            }
            ("g" | "go", Some(direction)) => self.go(direction)?,
            ("save", tag) => self.save(tag.unwrap_or(DEFAULT_SAVE))?,
            ("r" | "restore", tag) => self.restore(tag.unwrap_or(DEFAULT_SAVE))?,
            ("c" | "context", _) if self.cheat => {
                let json = serde_json::to_string_pretty(&self.context)
                    .map_err(|e| io::Error::other(e.to_string()))?;
                writeln!(self.out, "{json}")?;
            }
            (direction, None) if Direction::parse(direction).is_some() => self.go(direction)?,
            _ => {
                let said = arg.map_or_else(|| command.to_string(), |a| format!("{command} {a}"));
                writeln!(self.out, "could not understand: {said}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "  {}", "Explore mode".bold())?;
        for (usage, what) in [
            ("(q)uit", "leave the game"),
            ("(h)elp", "print this message"),
            ("(l)ook", "look around"),
            ("(l)ook THING", "look at THING"),
            ("(t)alk CHARACTER", "talk to CHARACTER, 'bye' to stop"),
            ("(i)nventory", "list what you carry"),
            ("(g)o DIRECTION", "go north, south, east or west (or n s e w)"),
            ("save [TAG]", "save the game under TAG"),
            ("(r)estore [TAG]", "restore the game saved as TAG"),
        ] {
            writeln!(self.out, "  {usage:<18} {what}")?;
        }
        if self.cheat {
            writeln!(self.out, "  {:<18} dump the context", "(c)ontext")?;
        }
        writeln!(self.out)
    }

    fn look(&mut self, thing: Option<&str>) -> io::Result<()> {
        let text = match thing {
            Some(name) => self.engine.describe_character(name),
            None => self.engine.describe_room(&self.context, THIS_ROOM),
        };
        match text {
            Ok(text) => writeln!(self.out, "{text}"),
            Err(e) => writeln!(self.out, "{}", e.to_string().yellow()),
        }
    }

    fn go(&mut self, direction: &str) -> io::Result<()> {
        match self.engine.go(&mut self.context, direction) {
            Some(room) => writeln!(self.out, "moved to {room}"),
            None => writeln!(self.out, "Cannot go {direction}"),
        }
    }

    fn talk(&mut self, name: &str, input: &mut impl BufRead) -> io::Result<Flow> {
        if !self.engine.can_hear(&self.context, name) {
            writeln!(self.out, "{name} cannot hear")?;
            return Ok(Flow::Continue);
        }

        let handshake = self.engine.config().handshake.clone();
        if let Flow::Quit = self.say(name, &handshake)? {
            return Ok(Flow::Quit);
        }

        let mut line = String::new();
        loop {
            write!(self.out, "<{name}> ")?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(Flow::Quit);
            }
            let said = line.trim();
            if said.eq_ignore_ascii_case("bye") || said == "q" {
                return Ok(Flow::Continue);
            }
            if let Flow::Quit = self.say(name, said)? {
                return Ok(Flow::Quit);
            }
        }
    }

    fn say(&mut self, name: &str, utterance: &str) -> io::Result<Flow> {
        let reply = match self.engine.hear(&mut self.context, name, utterance) {
            Ok(reply) => reply,
            Err(e) => {
                writeln!(self.out, "{}", e.to_string().yellow())?;
                return Ok(Flow::Continue);
            }
        };

        let presented = present(&reply, self.cheat);
        for notice in &presented.notices {
            writeln!(self.out, "{}", notice.bold())?;
        }
        if !presented.text.is_empty() {
            writeln!(self.out, "{}", presented.text)?;
        }
        Ok(if presented.won {
            Flow::Quit
        } else {
            Flow::Continue
        })
    }

    fn save(&mut self, tag: &str) -> io::Result<()> {
        let Some(path) = self.save_path(tag) else {
            return writeln!(self.out, "Bad save name: {tag}");
        };
        let blob = self
            .context
            .encode()
            .map_err(|e| io::Error::other(e.to_string()))?;
        fs::create_dir_all(self.save_dir)?;
        fs::write(&path, blob)?;
        tracing::info!(path = %path.display(), "game saved");
        writeln!(self.out, "Saved as {tag}")
    }

    fn restore(&mut self, tag: &str) -> io::Result<()> {
        let Some(path) = self.save_path(tag).filter(|p| p.is_file()) else {
            return writeln!(self.out, "No save named: {tag}");
        };
        let blob = fs::read_to_string(&path)?;
        match Context::decode(blob.trim()) {
            Ok(context) => {
                self.context = context;
                writeln!(self.out, "Restored {tag}")
            }
            Err(e) => writeln!(self.out, "{}", format!("Cannot restore {tag}: {e}").yellow()),
        }
    }

    fn save_path(&self, tag: &str) -> Option<PathBuf> {
        let valid = !tag.is_empty()
            && tag
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
        valid.then(|| self.save_dir.join(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use fp_core::Scenario;
    use fp_fiction::FuzzyMatcher;

    const SCENARIO: &str = r#"
_hello: The kingdom is restless.
rooms:
  throne:
    _description: A gilded hall.
    west: garden
  garden:
    _description: Roses everywhere.
    east: throne
characters:
  king:
    _room: throne
    _description: An old king.
    _hi: Welcome, traveller.
    _no_match: I do not follow.
    sword: "$set/_inventory/sword$ Take my sword."
    crown:
      - "$if/_inventory/sword$ The crown is yours. $win$"
      - "$default$ Prove yourself first."
"#;

    fn engine() -> FictionEngine {
        let scenario = Scenario::from_yaml_str(SCENARIO).unwrap();
        FictionEngine::new(scenario, Arc::new(FuzzyMatcher::default()))
    }

    fn play(engine: &FictionEngine, cheat: bool, save_dir: &Path, script: &str) -> String {
        let mut out = Vec::new();
        let mut game = Game::new(engine, cheat, save_dir, &mut out);
        game.play(&mut script.as_bytes()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn look_and_move() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = play(&engine(), false, dir.path(), "look\nw\nlook\ngo east\nnorth\nquit\n");
        assert!(out.starts_with("The kingdom is restless."));
        assert!(out.contains("[throne]: A gilded hall.\ninteractables: king\nwest: garden"));
        assert!(out.contains("moved to garden"));
        assert!(out.contains("[garden]: Roses everywhere."));
        assert!(out.contains("moved to throne"));
        assert!(out.contains("Cannot go north"));
    }

    #[test]
    fn talk_until_win() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = play(
            &engine(),
            true,
            dir.path(),
            "talk king\ncrown\nsword\ncrown\ninventory\n",
        );
        assert!(out.contains("(keyword: handshake)"));
        assert!(out.contains("Welcome, traveller."));
        assert!(out.contains("Prove yourself first."));
        assert!(out.contains("You got sword!"));
        assert!(out.contains("The crown is yours."));
        assert!(out.contains("You win!"));
        // the game ended before the inventory command was read
        assert!(!out.contains("You are carrying"));
    }

    #[test]
    fn talk_requires_same_room() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = play(&engine(), false, dir.path(), "w\ntalk king\nq\n");
        assert!(out.contains("king cannot hear"));
    }

    #[test]
    fn keywords_hidden_without_cheat() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = play(&engine(), false, dir.path(), "t king\nbye\ncontext\nq\n");
        assert!(!out.contains("(keyword:"));
        assert!(out.contains("could not understand: context"));
    }

    #[test]
    fn save_and_restore() {
        let dir = tempfile::TempDir::new().unwrap();
        let engine = engine();
        let out = play(
            &engine,
            false,
            dir.path(),
            "t king\nsword\nbye\nsave slot1\nsave ../evil\nq\n",
        );
        assert!(out.contains("Saved as slot1"));
        assert!(out.contains("Bad save name: ../evil"));
        assert!(dir.path().join("slot1").is_file());

        let out = play(&engine, false, dir.path(), "restore slot1\ni\nrestore nope\nq\n");
        assert!(out.contains("Restored slot1"));
        assert!(out.contains("You are carrying:\nsword"));
        assert!(out.contains("No save named: nope"));
    }

    #[test]
    fn cheat_dumps_context() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = play(&engine(), true, dir.path(), "c\nq\n");
        assert!(out.contains("\"room\": \"throne\""));
    }
}
