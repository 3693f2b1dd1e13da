use crate::error::CountError;
use crate::models::TallyRow;
use log::warn;

/// Picks the winning row of a plurality tally.
///
/// The option with the most votes wins. When the top count is shared the
/// operator has to name the winner; that name may be any option of the
/// voting. A voting with a single option always has that option as winner.
pub fn resolve_winner<'a>(
    voting_name: &str,
    tally: &'a [TallyRow],
    winner_name: Option<&str>,
) -> Result<&'a TallyRow, CountError> {
    let leader = tally
        .iter()
        .reduce(|best, row| if row.count > best.count { row } else { best })
        .ok_or_else(|| CountError::NoOptions(voting_name.to_string()))?;

    let tied = tally.iter().filter(|row| row.count == leader.count).count() > 1;
    if !tied {
        if let Some(name) = winner_name {
            if name != leader.name {
                warn!(
                    "Ignoring --winner '{}': '{}' leads with {} votes",
                    name, leader.name, leader.count
                );
            }
        }
        return Ok(leader);
    }

    let name = winner_name.ok_or(CountError::Undecided)?;
    tally
        .iter()
        .find(|row| row.name == name)
        .ok_or_else(|| CountError::WinnerNotFound(name.to_string()))
}
