use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use driftwood::board::Color;
use driftwood::game::Game;
use driftwood::movegen::GameStatus;
use driftwood::search::DEFAULT_DEPTH;

fn main() -> Result<()> {
    let mut driver = Driver::new();
    driver.run()
}

/// Line-oriented driver: one command per line, one answer per line. This is
/// a stand-in for the graphical host; it owns the turn loop and prints what
/// the engine reports.
struct Driver {
    game: Game,
}

impl Driver {
    fn new() -> Self {
        Self { game: Game::new() }
    }

    fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut line = String::new();

        while reader.read_line(&mut line)? > 0 {
            let command = line.trim();
            if command == "quit" {
                break;
            }
            match self.handle_command(command) {
                Ok(output) => {
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                }
                Err(err) => println!("error: {}", err),
            }
            stdout.flush()?;
            line.clear();
        }
        Ok(())
    }

    fn handle_command(&mut self, command: &str) -> Result<String> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(String::new());
        }

        match parts[0] {
            "new" => {
                self.game = Game::new();
                Ok("ok".to_string())
            }
            "place" => {
                let Some(placement) = parts.get(1) else {
                    bail!("usage: place <ranks>");
                };
                self.game = Game::from_placement(placement)?;
                Ok("ok".to_string())
            }
            "load" => {
                let Some(text) = parts.get(1) else {
                    bail!("usage: load <64-character snapshot>");
                };
                self.game.load_state_text(text)?;
                Ok("ok".to_string())
            }
            "side" => match parts.get(1) {
                Some(&"w") => {
                    self.game.set_side_to_move(Color::White);
                    Ok("ok".to_string())
                }
                Some(&"b") => {
                    self.game.set_side_to_move(Color::Black);
                    Ok("ok".to_string())
                }
                _ => bail!("usage: side w|b"),
            },
            "state" => Ok(self.game.state_text()),
            "board" => Ok(self.game.board().to_string()),
            "move" => {
                let Some((from, to)) = parts.get(1).and_then(|s| parse_move(s)) else {
                    bail!("usage: move <fromto>, e.g. move e2e4");
                };
                if self.game.apply_external_move(from, to) {
                    Ok("ok".to_string())
                } else {
                    Ok("illegal move".to_string())
                }
            }
            "legal" => {
                let Some((from, to)) = parts.get(1).and_then(|s| parse_move(s)) else {
                    bail!("usage: legal <fromto>, e.g. legal e2e4");
                };
                let side = self.game.side_to_move();
                Ok(if self.game.is_legal(from, to, side) {
                    "legal".to_string()
                } else {
                    "illegal".to_string()
                })
            }
            "go" => {
                let depth = parts
                    .get(1)
                    .and_then(|s| s.parse::<u32>().ok())
                    .unwrap_or(DEFAULT_DEPTH);
                let side = self.game.side_to_move();
                match self.game.computer_move(side, depth) {
                    Some(cm) => Ok(format!(
                        "move {}{} score {} nodes {}",
                        format_square(cm.from),
                        format_square(cm.to),
                        cm.score,
                        cm.nodes
                    )),
                    None => Ok("no legal moves".to_string()),
                }
            }
            "status" => {
                let side = self.game.side_to_move();
                Ok(match self.game.game_status(side) {
                    GameStatus::Ongoing => "ongoing".to_string(),
                    GameStatus::Checkmate(Color::White) => "checkmate, white wins".to_string(),
                    GameStatus::Checkmate(Color::Black) => "checkmate, black wins".to_string(),
                    GameStatus::Stalemate => "stalemate".to_string(),
                })
            }
            other => Ok(format!("unknown command: {}", other)),
        }
    }
}

/// Parses "e2e4" into a pair of display indices.
fn parse_move(text: &str) -> Option<(u8, u8)> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 4 {
        return None;
    }
    Some((
        square_from_chars(chars[0], chars[1])?,
        square_from_chars(chars[2], chars[3])?,
    ))
}

#[cfg(test)]
fn parse_square(text: &str) -> Option<u8> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 2 {
        return None;
    }
    square_from_chars(chars[0], chars[1])
}

fn square_from_chars(file_char: char, rank_char: char) -> Option<u8> {
    if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
        return None;
    }
    let file = file_char as u8 - b'a';
    let rank = rank_char as u8 - b'1';
    Some((7 - rank) * 8 + file)
}

fn format_square(display_idx: u8) -> String {
    let file = display_idx % 8;
    let rank = 7 - display_idx / 8;
    let mut result = String::new();
    result.push((b'a' + file) as char);
    result.push((b'1' + rank) as char);
    result
}
