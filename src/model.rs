// Wire types for the Arena backend API. Field names are bit-exact with the
// backend's JSON (camelCase, Portuguese domain terms).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rank::Categoria;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusJogador {
    Ativo,
    Banido,
    Inativo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTorneio {
    InscricoesAbertas,
    EmAndamento,
    Finalizado,
    Cancelado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormatoTorneio {
    EliminacaoSimples,
    EliminacaoDupla,
    PontosCorridos,
    Grupos,
}

impl std::fmt::Display for StatusTorneio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StatusTorneio::InscricoesAbertas => "INSCRICOES_ABERTAS",
            StatusTorneio::EmAndamento => "EM_ANDAMENTO",
            StatusTorneio::Finalizado => "FINALIZADO",
            StatusTorneio::Cancelado => "CANCELADO",
        })
    }
}

impl std::fmt::Display for FormatoTorneio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FormatoTorneio::EliminacaoSimples => "ELIMINACAO_SIMPLES",
            FormatoTorneio::EliminacaoDupla => "ELIMINACAO_DUPLA",
            FormatoTorneio::PontosCorridos => "PONTOS_CORRIDOS",
            FormatoTorneio::Grupos => "GRUPOS",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusPartida {
    Agendada,
    EmAndamento,
    Finalizada,
    Wo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneroJogo {
    Fps,
    Moba,
    BattleRoyale,
    Fighting,
    Racing,
    Sports,
    Rts,
    CardGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plataforma {
    Pc,
    Playstation,
    Xbox,
    Nintendo,
    Mobile,
    Multiplataforma,
}

/// A player record. `nickname` is the unique key.
///
/// The match/kill aggregates are `#[serde(default)]` because older backend
/// builds serve the slim DTO without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jogador {
    pub nickname: String,
    pub nome_real: String,
    pub email: String,
    pub data_nascimento: NaiveDate,
    pub elo: i32,
    pub categoria: Categoria,
    pub status: StatusJogador,
    #[serde(default)]
    pub total_partidas: u32,
    #[serde(default)]
    pub vitorias: u32,
    #[serde(default)]
    pub derrotas: u32,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub tempo_jogo_minutos: u32,
    #[serde(default)]
    pub modo_favorito: Option<String>,
    #[serde(default)]
    pub kd_ratio: f64,
    #[serde(default)]
    pub win_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jogo {
    pub nome: String,
    pub genero: GeneroJogo,
    pub max_jogadores_por_time: u32,
    pub plataforma: Plataforma,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Time {
    pub nome: String,
    pub tag: String,
    pub capitao: Jogador,
    pub membros: Vec<Jogador>,
    pub jogo_principal: Jogo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Torneio {
    pub nome: String,
    pub jogo: Jogo,
    pub formato: FormatoTorneio,
    pub data_inicio: String,
    pub data_fim: String,
    pub status: StatusTorneio,
    pub premio_total: f64,
    /// Mixed list of players and teams; kept untyped because the backend
    /// serializes both shapes into the same array.
    #[serde(default)]
    pub participantes: Vec<serde_json::Value>,
    #[serde(default)]
    pub partidas: Vec<Partida>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partida {
    pub placar1: i32,
    pub placar2: i32,
    pub data_hora: String,
    pub status: StatusPartida,
    pub rodada: u32,
}

// ── Auth payloads ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub nickname: String,
    pub senha: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub nickname: String,
    pub nome_real: String,
    pub email: String,
    pub senha: String,
    pub data_nascimento: NaiveDate,
}

/// Returned by login and register: the bearer token plus the player it
/// belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub jogador: Jogador,
}

/// Error body the backend attaches to rejected requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}
