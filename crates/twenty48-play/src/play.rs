use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;
use twenty48_utils::engine::Move;
use twenty48_utils::input::{SwipeTracker, direction_from_key, swipe_direction};
use twenty48_utils::session::{GameSession, GameStatus, MoveOutcome};
use twenty48_utils::share::{compose_url, share_message};
use twenty48_utils::store::KeyValueStore;

const HELP: &str = "\
commands:
  left|right|up|down, ArrowLeft.., h/j/k/l or a/s/d/w   move
  swipe <dx> <dy>                                      move by swipe displacement
  touch <x> <y> / release <x> <y>                      start and finish a swipe
  restart                                              new game (high score kept)
  login                                                sign in with Farcaster
  share                                                print a share link
  help                                                 this text
  quit                                                 exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Move(Move),
    Swipe(f32, f32),
    Touch(f32, f32),
    Release(f32, f32),
    Restart,
    Login,
    Share,
    Help,
    Quit,
}

/// Parse one input line. Unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    if let Some(dir) = direction_from_key(head) {
        return Some(Command::Move(dir));
    }
    let head = head.to_ascii_lowercase();
    let cmd = match head.as_str() {
        "left" | "h" | "a" => Command::Move(Move::Left),
        "right" | "l" | "d" => Command::Move(Move::Right),
        "up" | "k" | "w" => Command::Move(Move::Up),
        "down" | "j" | "s" => Command::Move(Move::Down),
        "swipe" | "touch" | "release" => {
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            match head.as_str() {
                "swipe" => Command::Swipe(x, y),
                "touch" => Command::Touch(x, y),
                _ => Command::Release(x, y),
            }
        }
        "restart" | "r" | "new" => Command::Restart,
        "login" => Command::Login,
        "share" => Command::Share,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Drive a session from line-based input until `quit` or end of input.
pub fn run<S, R, I, O>(
    session: &mut GameSession<S, R>,
    input: I,
    out: &mut O,
    compose_base: &str,
) -> Result<()>
where
    S: KeyValueStore,
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut tracker = SwipeTracker::new();
    render(session, out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(cmd) = parse_command(&line) else {
            writeln!(out, "unknown command {:?}; type `help`", line.trim())?;
            continue;
        };
        match cmd {
            Command::Move(dir) => apply(session, dir, out)?,
            Command::Swipe(dx, dy) => match swipe_direction(dx, dy) {
                Some(dir) => apply(session, dir, out)?,
                None => writeln!(out, "swipe too short")?,
            },
            Command::Touch(x, y) => tracker.begin(x, y),
            Command::Release(x, y) => {
                if !tracker.is_active() {
                    writeln!(out, "release without touch")?;
                    continue;
                }
                match tracker.end(x, y) {
                    Some(dir) => apply(session, dir, out)?,
                    None => writeln!(out, "swipe too short")?,
                }
            }
            Command::Restart => {
                tracker.cancel();
                session.reset();
                render(session, out)?;
            }
            Command::Login => {
                session.login();
                writeln!(out, "{}", session.auth_view())?;
            }
            Command::Share => {
                let url = compose_url(compose_base, &share_message(session.score()))?;
                writeln!(out, "share: {url}")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }
    log::info!(
        "leaving with score {} (high score {})",
        session.score(),
        session.high_score()
    );
    Ok(())
}

fn apply<S, R, O>(session: &mut GameSession<S, R>, dir: Move, out: &mut O) -> Result<()>
where
    S: KeyValueStore,
    R: Rng,
    O: Write,
{
    match session.apply_move(dir) {
        MoveOutcome::Ignored => writeln!(out, "game finished; type `restart`")?,
        MoveOutcome::Unchanged => writeln!(out, "nothing moves {dir}")?,
        MoveOutcome::Moved { .. } => render(session, out)?,
    }
    Ok(())
}

fn render<S, R, O>(session: &GameSession<S, R>, out: &mut O) -> Result<()>
where
    S: KeyValueStore,
    R: Rng,
    O: Write,
{
    writeln!(out, "{}", session.auth_view())?;
    writeln!(
        out,
        "Score: {}  Highscore: {}",
        session.score(),
        session.high_score()
    )?;
    write!(out, "{}", session.board())?;
    match session.status() {
        GameStatus::Won => writeln!(out, "You Win!")?,
        GameStatus::GameOver => writeln!(out, "Game Over!")?,
        GameStatus::Playing => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::io::Cursor;
    use twenty48_utils::identity::{ConfiguredIdentity, DisplayIdentity};
    use twenty48_utils::session::HIGH_SCORE_KEY;
    use twenty48_utils::share::DEFAULT_COMPOSE_URL;
    use twenty48_utils::store::MemoryStore;

    fn session_with(store: MemoryStore) -> GameSession<MemoryStore, StdRng> {
        let identity = ConfiguredIdentity::new(Some(DisplayIdentity {
            username: "alice".into(),
            fid: 99,
            avatar_url: None,
        }));
        GameSession::new(store, Box::new(identity), StdRng::seed_from_u64(11))
    }

    fn play(session: &mut GameSession<MemoryStore, StdRng>, script: &str) -> String {
        let mut out = Vec::new();
        run(session, Cursor::new(script), &mut out, DEFAULT_COMPOSE_URL).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_moves_and_aliases() {
        assert_eq!(parse_command("ArrowUp"), Some(Command::Move(Move::Up)));
        assert_eq!(parse_command("LEFT"), Some(Command::Move(Move::Left)));
        assert_eq!(parse_command("j"), Some(Command::Move(Move::Down)));
        assert_eq!(parse_command("d"), Some(Command::Move(Move::Right)));
        assert_eq!(parse_command("  q "), Some(Command::Quit));
        assert_eq!(parse_command("swipe -40 5"), Some(Command::Swipe(-40.0, 5.0)));
        assert_eq!(parse_command("swipe 10"), None);
        assert_eq!(parse_command("touch 5 6"), Some(Command::Touch(5.0, 6.0)));
        assert_eq!(parse_command("release 5 x"), None);
        assert_eq!(parse_command("jump"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn renders_initial_state_signed_out() {
        let mut s = session_with(MemoryStore::new());
        let text = play(&mut s, "quit\n");
        assert!(text.starts_with("Sign in with Farcaster\n"));
        assert!(text.contains("Score: 0  Highscore: 0"));
    }

    #[test]
    fn login_shows_identity() {
        let mut s = session_with(MemoryStore::new());
        let text = play(&mut s, "login\n");
        assert!(text.contains("Signed in as alice (FID: 99)"));
    }

    #[test]
    fn short_swipe_and_unknown_input_do_not_move() {
        let mut s = session_with(MemoryStore::new());
        let before = s.board();
        let text = play(&mut s, "swipe 10 10\nfly\n");
        assert!(text.contains("swipe too short"));
        assert!(text.contains("unknown command \"fly\""));
        assert_eq!(s.board(), before);
    }

    #[test]
    fn touch_then_release_moves_like_a_swipe() {
        let mut a = session_with(MemoryStore::new());
        let mut b = session_with(MemoryStore::new());
        play(&mut a, "touch 100 100\nrelease 20 110\n");
        play(&mut b, "left\n");
        assert_eq!(a.board(), b.board());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn release_needs_a_touch_and_enough_travel() {
        let mut s = session_with(MemoryStore::new());
        let before = s.board();
        let text = play(&mut s, "release 0 0\ntouch 0 0\nrelease 20 20\nrelease 200 0\n");
        assert!(text.contains("release without touch"));
        assert_eq!(text.matches("release without touch").count(), 2);
        assert!(text.contains("swipe too short"));
        assert_eq!(s.board(), before);
    }

    #[test]
    fn restart_drops_pending_touch() {
        let mut s = session_with(MemoryStore::new());
        let text = play(&mut s, "touch 0 0\nrestart\nrelease 0 200\n");
        assert!(text.contains("release without touch"));
    }

    #[test]
    fn share_prints_compose_link() {
        let mut s = session_with(MemoryStore::new());
        let text = play(&mut s, "share\n");
        assert!(text.contains("share: https://warpcast.com/~/compose?text=I+scored+0"));
    }

    #[test]
    fn restart_keeps_high_score() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "300").unwrap();
        let mut s = session_with(store);
        let text = play(&mut s, "left\nup\nright\ndown\nrestart\n");
        assert_eq!(s.score(), 0);
        assert!(s.high_score() >= 300);
        assert!(text.contains("Highscore: 300"));
    }
}
