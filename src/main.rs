// The arena binary: terminal front end over the Arena API.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;

use arena_client::guard::{guard_route, RouteDecision};
use arena_client::model::RegisterRequest;
use arena_client::poll::{spawn_poller, PollState};
use arena_client::view;
use arena_client::{ApiClient, ApiError, Config, SessionManager, TokenVault};

const USAGE: &str = "\
arena - Arena e-sports platform client

USAGE:
    arena [--api-url <URL>] [--data-dir <DIR>] <COMMAND>

COMMANDS:
    login <nickname> <senha>
    register <nickname> <nome-real> <email> <senha> <nascimento YYYY-MM-DD>
    logout
    whoami
    profile <nickname>
    jogadores
    ranking [limit]
    times
    torneios
    fila [--watch]
    entrar
    sair
";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = Config::load();
    let args = positional_args();
    let Some(command) = args.first().map(String::as_str) else {
        eprint!("{USAGE}");
        return ExitCode::FAILURE;
    };

    match run(&config, command, &args[1..]).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, command: &str, args: &[String]) -> Result<(), ApiError> {
    let vault = Arc::new(TokenVault::open(&config.data_dir)?);
    let client = ApiClient::new(config, vault.clone()).expect("failed to build HTTP client");
    let mut session = SessionManager::new(client, vault.clone());

    // Startup revalidation runs before every command. Failures are silent;
    // we just end up anonymous.
    session.restore().await;

    match command {
        "login" | "register" => {
            // Same rule the web middleware applied: a signed-in visitor on
            // an auth page goes back to the home view.
            let route = if command == "login" { "/login" } else { "/register" };
            let seen_token = arena_client::guard::token_from_request(&vault, None)?;
            if guard_route(route, seen_token.as_deref()) == RouteDecision::RedirectHome {
                if let Some(jogador) = session.jogador() {
                    println!("já autenticado como {}", jogador.nickname);
                    print!("{}", view::rank_card(jogador));
                }
                return Ok(());
            }
            if command == "login" {
                let [nickname, senha] = expect_args::<2>(args, "login <nickname> <senha>")?;
                let jogador = session.login(&nickname, &senha).await?;
                println!("bem-vindo, {}!", jogador.nickname);
                print!("{}", view::rank_card(jogador));
            } else {
                let [nickname, nome_real, email, senha, nascimento] = expect_args::<5>(
                    args,
                    "register <nickname> <nome-real> <email> <senha> <nascimento>",
                )?;
                let data_nascimento = parse_date(&nascimento)?;
                let req = RegisterRequest {
                    nickname,
                    nome_real,
                    email,
                    senha,
                    data_nascimento,
                };
                let jogador = session.register(&req).await?;
                println!("conta criada, bem-vindo {}!", jogador.nickname);
                print!("{}", view::rank_card(jogador));
            }
        }
        "logout" => {
            session.logout();
            println!("sessão encerrada");
        }
        "whoami" => match session.jogador() {
            Some(jogador) => print!("{}", view::rank_card(jogador)),
            None => println!("não autenticado"),
        },
        "profile" => {
            let [nickname] = expect_args::<1>(args, "profile <nickname>")?;
            match session.client().jogador(&nickname).await {
                Ok(jogador) => print!("{}", view::rank_card(&jogador)),
                // Dedicated not-found state, distinct from generic failure.
                Err(ApiError::JogadorNotFound(nick)) => {
                    println!("jogador \"{nick}\" não encontrado")
                }
                Err(e) => return Err(e),
            }
        }
        "jogadores" => {
            let jogadores = session.client().jogadores().await?;
            print!("{}", view::ranking_table(&jogadores));
        }
        "ranking" => {
            let limit = args
                .first()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10);
            let jogadores = session.client().ranking(limit).await?;
            print!("{}", view::ranking_table(&jogadores));
        }
        "times" => {
            let times = session.client().times().await?;
            print!("{}", view::times_table(&times));
        }
        "torneios" => {
            let torneios = session.client().torneios().await?;
            print!("{}", view::torneios_table(&torneios));
        }
        "fila" => {
            if std::env::args().any(|a| a == "--watch") {
                watch_fila(config, &session).await;
            } else {
                let fila = session.client().fila().await?;
                print!("{}", view::fila_list(&fila));
            }
        }
        "entrar" => {
            let nickname = require_nickname(&session)?;
            session.client().entrar_fila(&nickname).await?;
            println!("{nickname} entrou na fila");
        }
        "sair" => {
            let nickname = require_nickname(&session)?;
            session.client().sair_fila(&nickname).await?;
            println!("{nickname} saiu da fila");
        }
        other => {
            eprintln!("unknown command: {other}");
            eprint!("{USAGE}");
        }
    }

    Ok(())
}

/// Live queue view: re-render on every poll until interrupted.
async fn watch_fila(config: &Config, session: &SessionManager) {
    let client = session.client().clone();
    let mut rx = spawn_poller(config.poll_interval, move || {
        let client = client.clone();
        async move { client.fila().await }
    });

    println!("observando a fila (ctrl-c para sair)");
    while rx.changed().await.is_ok() {
        match &*rx.borrow_and_update() {
            PollState::Pending => {}
            PollState::Ready(fila) => print!("{}", view::fila_list(fila)),
            PollState::Failed(msg) => eprintln!("falha ao atualizar a fila: {msg}"),
        }
    }
}

/// Queue membership is keyed by the signed-in player's nickname.
fn require_nickname(session: &SessionManager) -> Result<String, ApiError> {
    session
        .jogador()
        .map(|j| j.nickname.clone())
        .ok_or_else(|| ApiError::Rejected {
            status: 401,
            message: "faça login antes de usar a fila".into(),
        })
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    raw.parse().map_err(|_| ApiError::Rejected {
        status: 400,
        message: format!("data de nascimento inválida: {raw} (use YYYY-MM-DD)"),
    })
}

fn expect_args<const N: usize>(args: &[String], usage: &str) -> Result<[String; N], ApiError> {
    if args.len() < N {
        return Err(ApiError::Rejected {
            status: 400,
            message: format!("usage: arena {usage}"),
        });
    }
    Ok(std::array::from_fn(|i| args[i].clone()))
}

/// Positional arguments with the global flags (and their values) removed.
fn positional_args() -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--api-url" | "--data-dir" => {
                let _ = iter.next();
            }
            "--watch" => {}
            _ => out.push(arg),
        }
    }
    out
}
