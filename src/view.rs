// Terminal rendering for the arena binary: rank cards, listings, and the
// queue view. Presentation only; every derived number comes from `rank`.

use crate::model::{Jogador, Time, Torneio};
use crate::rank::{color_token, progress, Categoria};

const PROGRESS_WIDTH: usize = 20;

/// ANSI color for a rank color token. Unknown tokens render unstyled.
fn ansi_for(token: &str) -> &'static str {
    match token {
        "rank-bronze" => "\x1b[33m",
        "rank-silver" => "\x1b[37m",
        "rank-gold" => "\x1b[93m",
        "rank-diamond" => "\x1b[96m",
        "rank-master" => "\x1b[95m",
        _ => "",
    }
}

const RESET: &str = "\x1b[0m";

/// ASCII progress bar, e.g. `[##########----------]  50%`.
pub fn progress_bar(pct: f64) -> String {
    let filled = (pct / 100.0 * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        pct
    )
}

/// Profile card for a single player. The category shown is derived from the
/// rating, so a stale `categoria` from the backend cannot mislabel the card.
pub fn rank_card(jogador: &Jogador) -> String {
    let categoria = Categoria::from_elo(jogador.elo);
    let pct = progress(jogador.elo, categoria);
    let color = ansi_for(color_token(categoria));

    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n",
        jogador.nickname, jogador.nome_real
    ));
    out.push_str(&format!(
        "  {color}{categoria}{RESET}  ELO {}\n",
        jogador.elo
    ));
    out.push_str(&format!("  {}\n", progress_bar(pct)));
    out.push_str(&format!(
        "  partidas: {}  V/D: {}/{}  K/D: {:.2}  winrate: {:.1}%\n",
        jogador.total_partidas,
        jogador.vitorias,
        jogador.derrotas,
        jogador.kd_ratio,
        jogador.win_rate * 100.0
    ));
    out
}

/// Ranking listing, in the order the backend returned it.
pub fn ranking_table(jogadores: &[Jogador]) -> String {
    let mut out = format!(
        "{:>3}  {:<20} {:>5}  {:<9}\n",
        "#", "nickname", "elo", "categoria"
    );
    for (i, j) in jogadores.iter().enumerate() {
        let categoria = Categoria::from_elo(j.elo);
        let color = ansi_for(color_token(categoria));
        out.push_str(&format!(
            "{:>3}  {:<20} {:>5}  {color}{categoria}{RESET}\n",
            i + 1,
            j.nickname,
            j.elo,
        ));
    }
    out
}

pub fn times_table(times: &[Time]) -> String {
    let mut out = String::new();
    for t in times {
        out.push_str(&format!(
            "[{}] {} - capitão {}  ({} membros, {})\n",
            t.tag,
            t.nome,
            t.capitao.nickname,
            t.membros.len(),
            t.jogo_principal.nome
        ));
    }
    if out.is_empty() {
        out.push_str("nenhum time cadastrado\n");
    }
    out
}

pub fn torneios_table(torneios: &[Torneio]) -> String {
    let mut out = String::new();
    for t in torneios {
        out.push_str(&format!(
            "{} ({}) - {}  {} a {}  premiação R$ {:.2}\n",
            t.nome, t.formato, t.status, t.data_inicio, t.data_fim, t.premio_total
        ));
    }
    if out.is_empty() {
        out.push_str("nenhum torneio cadastrado\n");
    }
    out
}

/// The matchmaking queue, front of the line first.
pub fn fila_list(nicknames: &[String]) -> String {
    if nicknames.is_empty() {
        return "fila vazia\n".to_string();
    }
    let mut out = format!("{} na fila:\n", nicknames.len());
    for (i, nick) in nicknames.iter().enumerate() {
        out.push_str(&format!("{:>3}. {nick}\n", i + 1));
    }
    out
}
