// Shared test fixture: an in-process stub of the external Arena API.
#![allow(dead_code)]

//
// The stub accepts the credentials shadowfang/secret, hands out the token
// "abc", and records the Authorization header of the last data request so
// tests can assert what the client actually sent.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use arena_client::store::TokenVault;

pub const GOOD_NICK: &str = "shadowfang";
pub const GOOD_SENHA: &str = "secret";
pub const ISSUED_TOKEN: &str = "abc";
/// A registered nickname full of characters that need path encoding.
pub const ODD_NICK: &str = "dj/arena #9";
/// Joining the queue as this nickname makes the stub answer a bodyless 500.
pub const CHAOS_NICK: &str = "caos";

#[derive(Default)]
pub struct StubState {
    pub valid_tokens: Mutex<HashSet<String>>,
    pub last_auth_header: Mutex<Option<Option<String>>>,
    pub fila: Mutex<Vec<String>>,
}

impl StubState {
    /// The Authorization header seen by the most recent data request:
    /// `None` if no request arrived yet, `Some(None)` if one arrived bare.
    pub fn last_auth(&self) -> Option<Option<String>> {
        self.last_auth_header.lock().unwrap().clone()
    }

    pub fn accept_token(&self, token: &str) {
        self.valid_tokens.lock().unwrap().insert(token.to_string());
    }
}

pub fn jogador_json(nickname: &str, elo: i64) -> Value {
    json!({
        "nickname": nickname,
        "nomeReal": "Ana Souza",
        "email": "ana@example.com",
        "dataNascimento": "2001-03-14",
        "elo": elo,
        "categoria": categoria_for(elo),
        "status": "ATIVO",
        "totalPartidas": 120,
        "vitorias": 70,
        "derrotas": 50,
        "kills": 900,
        "deaths": 600,
        "assists": 300,
        "kdRatio": 1.5,
        "winRate": 0.5833
    })
}

fn categoria_for(elo: i64) -> &'static str {
    match elo {
        ..=999 => "BRONZE",
        1000..=1499 => "PRATA",
        1500..=1999 => "OURO",
        2000..=2499 => "DIAMANTE",
        _ => "MESTRE",
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn record_auth(state: &StubState, headers: &HeaderMap) {
    let raw = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_auth_header.lock().unwrap() = Some(raw);
}

async fn login(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> impl IntoResponse {
    if body["nickname"] == GOOD_NICK && body["senha"] == GOOD_SENHA {
        state.accept_token(ISSUED_TOKEN);
        (
            StatusCode::OK,
            Json(json!({ "token": ISSUED_TOKEN, "jogador": jogador_json(GOOD_NICK, 1742) })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Nickname ou senha inválidos" })),
        )
    }
}

async fn register(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if body["nickname"] == GOOD_NICK {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Nickname já cadastrado" })),
        );
    }
    state.accept_token(ISSUED_TOKEN);
    let nickname = body["nickname"].as_str().unwrap_or("novato");
    (
        StatusCode::CREATED,
        Json(json!({ "token": ISSUED_TOKEN, "jogador": jogador_json(nickname, 0) })),
    )
}

async fn validate(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    match bearer(&headers) {
        Some(token) if state.valid_tokens.lock().unwrap().contains(&token) => {
            (StatusCode::OK, Json(jogador_json(GOOD_NICK, 1742)))
        }
        _ => (StatusCode::UNAUTHORIZED, Json(json!({}))),
    }
}

#[derive(serde::Deserialize)]
struct RankingParams {
    limit: Option<usize>,
}

async fn ranking(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(params): Query<RankingParams>,
) -> impl IntoResponse {
    record_auth(&state, &headers);
    let all = vec![
        jogador_json("mestre-supremo", 2600),
        jogador_json(GOOD_NICK, 1742),
        jogador_json("novato", 800),
    ];
    let limit = params.limit.unwrap_or(10).min(all.len());
    Json(all[..limit].to_vec())
}

async fn jogador_by_nick(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(nickname): Path<String>,
) -> impl IntoResponse {
    record_auth(&state, &headers);
    if nickname == GOOD_NICK {
        (StatusCode::OK, Json(jogador_json(GOOD_NICK, 1742)))
    } else if nickname == ODD_NICK {
        (StatusCode::OK, Json(jogador_json(ODD_NICK, 1200)))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Jogador não encontrado" })),
        )
    }
}

async fn jogadores_list(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record_auth(&state, &headers);
    Json(vec![
        jogador_json(GOOD_NICK, 1742),
        jogador_json("novato", 800),
    ])
}

fn jogo_json() -> Value {
    json!({
        "nome": "Valorant",
        "genero": "FPS",
        "maxJogadoresPorTime": 5,
        "plataforma": "PC"
    })
}

async fn times(State(state): State<Arc<StubState>>, headers: HeaderMap) -> impl IntoResponse {
    record_auth(&state, &headers);
    Json(json!([{
        "nome": "Fúria Eterna",
        "tag": "FUR",
        "capitao": jogador_json(GOOD_NICK, 1742),
        "membros": [jogador_json(GOOD_NICK, 1742), jogador_json("novato", 800)],
        "jogoPrincipal": jogo_json()
    }]))
}

async fn torneios(State(state): State<Arc<StubState>>, headers: HeaderMap) -> impl IntoResponse {
    record_auth(&state, &headers);
    Json(json!([{
        "nome": "Copa Arena",
        "jogo": jogo_json(),
        "formato": "ELIMINACAO_SIMPLES",
        "dataInicio": "2026-01-10",
        "dataFim": "2026-01-12",
        "status": "INSCRICOES_ABERTAS",
        "premioTotal": 5000.0,
        "participantes": [jogador_json(GOOD_NICK, 1742)],
        "partidas": [{
            "placar1": 2,
            "placar2": 1,
            "dataHora": "2026-01-10T12:00:00",
            "status": "FINALIZADA",
            "rodada": 1
        }]
    }]))
}

#[derive(serde::Deserialize)]
struct FilaParams {
    nickname: String,
}

async fn ver_fila(State(state): State<Arc<StubState>>, headers: HeaderMap) -> impl IntoResponse {
    record_auth(&state, &headers);
    Json(state.fila.lock().unwrap().clone())
}

async fn entrar_fila(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(params): Query<FilaParams>,
) -> impl IntoResponse {
    record_auth(&state, &headers);
    if params.nickname == CHAOS_NICK {
        // Deliberately no JSON body: exercises the generic-message fallback.
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    state.fila.lock().unwrap().push(params.nickname);
    StatusCode::OK.into_response()
}

async fn sair_fila(
    State(state): State<Arc<StubState>>,
    Query(params): Query<FilaParams>,
) -> impl IntoResponse {
    state.fila.lock().unwrap().retain(|n| n != &params.nickname);
    StatusCode::OK
}

/// Spawn the stub on an ephemeral port; returns its state handle and the
/// base URL (without the `/api` prefix, which the client appends).
pub async fn spawn_stub() -> (Arc<StubState>, String) {
    let state = Arc::new(StubState::default());
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/validate", get(validate))
        .route("/api/jogadores", get(jogadores_list))
        .route("/api/jogadores/ranking", get(ranking))
        .route("/api/jogadores/{nickname}", get(jogador_by_nick))
        .route("/api/times", get(times))
        .route("/api/torneios", get(torneios))
        .route("/api/matchmaking/fila", get(ver_fila))
        .route("/api/matchmaking/entrar", post(entrar_fila))
        .route("/api/matchmaking/sair", post(sair_fila))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (state, format!("http://{addr}"))
}

/// A fresh vault under a unique temp directory.
pub fn temp_vault(tag: &str) -> (Arc<TokenVault>, std::path::PathBuf) {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let dir = std::env::temp_dir().join(format!(
        "arena-test-{tag}-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let vault = TokenVault::open(&dir).unwrap();
    (Arc::new(vault), dir)
}

/// An address nothing listens on: bind an ephemeral port, then drop it.
pub async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
