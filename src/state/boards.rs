use futures_util::future::try_join;
use log::debug;
use scorecast_api::{ApiResult, GroupStanding, LeaderboardEntry, RemoteStore, Session};

/// Leaderboard and group tables, always replaced as a whole.
#[derive(Debug, Clone, Default)]
pub struct Boards {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub standings: Vec<GroupStanding>,
}

impl Boards {
    /// Standings grouped by group label, in first-seen order.
    pub fn groups(&self) -> Vec<(&str, Vec<&GroupStanding>)> {
        let mut out: Vec<(&str, Vec<&GroupStanding>)> = Vec::new();
        for row in &self.standings {
            match out.iter_mut().find(|(g, _)| *g == row.group) {
                Some((_, rows)) => rows.push(row),
                None => out.push((row.group.as_str(), vec![row])),
            }
        }
        out
    }
}

pub async fn load_boards<S: RemoteStore>(store: &S, session: &Session) -> ApiResult<Boards> {
    debug!("loading leaderboard and group standings");
    let (leaderboard, standings) =
        try_join(store.fetch_leaderboard(session), store.fetch_group_standings(session)).await?;
    Ok(Boards { leaderboard, standings })
}
