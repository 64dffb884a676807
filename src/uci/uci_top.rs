//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current position, routes `go` requests
//! to the selected engine and emits protocol-compliant output.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::board::move_rules::{ChessRules, MoveRules};
use crate::board::position::Position;
use crate::config::SearchConfig;
use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::engines::engine_tree_search::TreeSearchEngine;
use crate::tree::builder::MAX_TREE_DEPTH;

pub fn run_stdio_loop(config: SearchConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new(config);

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineChoice {
    TreeSearch,
    Greedy,
}

struct UciState {
    position: Position,
    config: SearchConfig,
    engine_choice: EngineChoice,
    engine: Box<dyn Engine>,
    debug_mode: bool,
}

impl UciState {
    fn new(config: SearchConfig) -> Self {
        let engine_choice = EngineChoice::TreeSearch;
        Self {
            position: Position::startpos(),
            engine: build_engine(engine_choice, &config),
            config,
            engine_choice,
            debug_mode: false,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        debug!(command = trimmed, "uci");

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Engine type combo default tree var tree var greedy"
                )?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 0 max {}",
                    self.config.depth, MAX_TREE_DEPTH
                )?;
                writeln!(
                    out,
                    "option name Branching type spin default {} min 1 max 256",
                    self.config.branching_limit
                )?;
                writeln!(
                    out,
                    "option name Algorithm type combo default {} var minimax var alpha-beta var both",
                    self.config.algorithm
                )?;
                writeln!(
                    out,
                    "option name Evaluator type combo default {} var heuristic var material",
                    self.config.evaluator
                )?;
                writeln!(out, "option name Seed type string default none")?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.position = Position::startpos();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out) {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            }
            "stop" | "ponderhit" | "register" => {
                // Search is synchronous; nothing to interrupt.
            }
            "debug" => {
                let mode = parts.next().unwrap_or_default();
                self.debug_mode = mode.eq_ignore_ascii_case("on");
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                // Unknown commands are ignored for UCI compatibility.
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace();
        let _ = tokens.next(); // setoption

        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in tokens {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Engine") {
            self.engine_choice = match value.to_ascii_lowercase().as_str() {
                "tree" | "tree-search" => EngineChoice::TreeSearch,
                "greedy" => EngineChoice::Greedy,
                other => return Err(format!("unknown engine '{}'", other)),
            };
            self.engine = build_engine(self.engine_choice, &self.config);
            self.engine.new_game();
            return Ok(());
        }

        // The session config is validated first so a bad value is reported
        // even when the active engine has no use for that option.
        self.config
            .apply_option(&name, &value)
            .map_err(|e| e.to_string())?;
        self.engine.set_option(&name, &value)
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().peekable();
        let _ = tokens.next(); // "position"

        let mut position = match tokens.next() {
            Some("startpos") => Position::startpos(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(next) = tokens.next_if(|tok| *tok != "moves") {
                    fen_parts.push(next);
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                Position::from_fen(&fen_parts.join(" ")).map_err(|e| e.to_string())?
            }
            Some(other) => return Err(format!("unsupported position token '{}'", other)),
            None => return Err("incomplete position command".to_owned()),
        };

        if tokens.next_if_eq(&"moves").is_some() {
            let rules = ChessRules;
            for lan in tokens {
                let mv = rules.parse_move(&position, lan).map_err(|e| e.to_string())?;
                position = rules.apply(&position, mv);
            }
        }

        self.position = position;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> Result<(), String> {
        let params = parse_go_params(line);
        let result = self.engine.choose_move(&self.position, &params)?;

        if self.debug_mode {
            writeln!(out, "info string engine {}", self.engine.name()).map_err(|e| e.to_string())?;
        }
        for info in &result.info_lines {
            writeln!(out, "{}", info).map_err(|e| e.to_string())?;
        }

        let written = match result.best_move {
            Some(best_move) => writeln!(out, "bestmove {}", best_move),
            None => writeln!(out, "bestmove 0000"),
        };
        written.map_err(|e| e.to_string())
    }
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let mut i = 0usize;
    while i < tokens.len() {
        if tokens[i] == "depth" {
            i += 1;
            params.depth = tokens.get(i).and_then(|x| x.parse::<usize>().ok());
        }
        i += 1;
    }
    params
}

fn build_engine(choice: EngineChoice, config: &SearchConfig) -> Box<dyn Engine> {
    match choice {
        EngineChoice::TreeSearch => Box::new(TreeSearchEngine::new(config.clone())),
        EngineChoice::Greedy => Box::new(GreedyEngine::new(config.evaluator)),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_go_params, EngineChoice, UciState};
    use crate::config::SearchConfig;
    use crate::search::tree_search::SearchAlgorithm;

    fn seeded_state() -> UciState {
        UciState::new(SearchConfig {
            depth: 2,
            seed: Some(5),
            ..SearchConfig::default()
        })
    }

    fn run(state: &mut UciState, line: &str) -> String {
        let mut out = Vec::new();
        state
            .handle_command(line, &mut out)
            .expect("writing to a buffer should succeed");
        String::from_utf8(out).expect("output should be utf-8")
    }

    #[test]
    fn position_startpos_with_moves_updates_state() {
        let mut state = seeded_state();
        state
            .handle_position("position startpos moves e2e4 e7e5 g1f3")
            .expect("position command should parse");

        assert_eq!(state.position.side_to_move(), chess::Color::Black);
        assert!(state
            .position
            .fen()
            .starts_with("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq"));
    }

    #[test]
    fn position_fen_without_moves_updates_state() {
        let mut state = seeded_state();
        state
            .handle_position("position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")
            .expect("position fen should parse");

        assert_eq!(state.position.fen(), "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    }

    #[test]
    fn illegal_position_move_keeps_previous_position() {
        let mut state = seeded_state();
        let out = run(&mut state, "position startpos moves e2e5");
        assert!(out.starts_with("info string position error:"));
        assert_eq!(state.position, crate::board::position::Position::startpos());
    }

    #[test]
    fn uci_handshake_lists_options() {
        let mut state = seeded_state();
        let out = run(&mut state, "uci");
        assert!(out.starts_with("id name GameTree Chess\n"));
        assert!(out.contains("id author gametree_chess\n"));
        assert!(out.contains("option name Depth type spin default 2 min 0 max 12\n"));
        assert!(out.ends_with("uciok\n"));
        assert_eq!(run(&mut state, "isready"), "readyok\n");
    }

    #[test]
    fn go_prints_info_and_a_legal_bestmove() {
        let mut state = seeded_state();
        run(&mut state, "position startpos moves d2d4 d7d5");
        let out = run(&mut state, "go depth 2");

        assert!(out.starts_with("info depth 2 score cp "));
        let best = out
            .lines()
            .last()
            .and_then(|line| line.strip_prefix("bestmove "))
            .expect("bestmove line should be last");
        let mv = crate::board::move_rules::long_algebraic_to_move(best)
            .expect("bestmove should be long algebraic");
        assert!(state.position.is_legal(mv));
    }

    #[test]
    fn go_on_mated_position_reports_null_move() {
        let mut state = seeded_state();
        run(&mut state, "position fen 6k1/6Q1/6K1/8/8/8/8/8 b - - 0 1");
        let out = run(&mut state, "go");
        assert!(out.ends_with("bestmove 0000\n"));
    }

    #[test]
    fn go_with_too_deep_request_reports_error() {
        let mut state = seeded_state();
        let out = run(&mut state, "go depth 40");
        assert!(out.starts_with("info string go error:"));
        assert!(out.ends_with("bestmove 0000\n"));
    }

    #[test]
    fn setoption_engine_switches_engine() {
        let mut state = seeded_state();
        assert_eq!(state.engine_choice, EngineChoice::TreeSearch);

        state
            .handle_setoption("setoption name Engine value greedy")
            .expect("setoption should parse");
        assert_eq!(state.engine_choice, EngineChoice::Greedy);
        assert_eq!(state.engine.name(), "GameTree Chess Greedy");

        assert!(state
            .handle_setoption("setoption name Engine value stockfish")
            .is_err());
    }

    #[test]
    fn setoption_search_knobs_survive_engine_switch() {
        let mut state = seeded_state();
        state
            .handle_setoption("setoption name Algorithm value minimax")
            .expect("algorithm should parse");
        state
            .handle_setoption("setoption name Depth value 3")
            .expect("depth should parse");
        state
            .handle_setoption("setoption name Engine value greedy")
            .expect("engine should parse");
        state
            .handle_setoption("setoption name Engine value tree")
            .expect("engine should parse");

        assert_eq!(state.config.algorithm, SearchAlgorithm::Minimax);
        assert_eq!(state.config.depth, 3);
    }

    #[test]
    fn setoption_with_bad_value_reports_error() {
        let mut state = seeded_state();
        let out = run(&mut state, "setoption name Depth value lots");
        assert!(out.starts_with("info string setoption error:"));
        assert_eq!(state.config.depth, 2);
    }

    #[test]
    fn setoption_is_validated_whichever_engine_is_active() {
        let mut state = seeded_state();
        run(&mut state, "setoption name Engine value greedy");
        assert_eq!(state.engine_choice, EngineChoice::Greedy);

        let out = run(&mut state, "setoption name Depth value 99");
        assert!(out.starts_with("info string setoption error:"));
        assert!(out.contains("exceeds maximum 12"));
        assert_eq!(state.config.depth, 2);

        let out = run(&mut state, "setoption name Branching value 0");
        assert!(out.starts_with("info string setoption error:"));

        assert_eq!(run(&mut state, "setoption name Depth value 3"), "");
        run(&mut state, "setoption name Engine value tree");
        assert_eq!(state.config.depth, 3);
    }

    #[test]
    fn parse_go_params_reads_depth_and_skips_clock_tokens() {
        assert_eq!(parse_go_params("go depth 6 movetime 1500 infinite").depth, Some(6));
        assert_eq!(parse_go_params("go wtime 1000 depth 3").depth, Some(3));
        assert_eq!(parse_go_params("go wtime 1000").depth, None);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut state = seeded_state();
        let mut out = Vec::new();
        assert!(state.handle_command("quit", &mut out).expect("quit should succeed"));
        assert!(!state.handle_command("ucinewgame", &mut out).expect("ok"));
    }
}
