//! Buff ticking.

use tracing::debug;

use crate::character::CharacterId;
use crate::effect::{ActiveBuff, BuffPhase};

use super::{CombatEngine, CombatEvent};

impl CombatEngine {
    /// Advance every active buff by `dt` time units.
    ///
    /// All buff lists are detached before the first tick, so buffs spawned by
    /// start or end effects during this step are first ticked on the next
    /// call. Characters are visited in id order.
    pub fn advance(&mut self, dt: f32) {
        let detached: Vec<(CharacterId, Vec<ActiveBuff>)> = self
            .characters
            .iter_mut()
            .filter_map(|(id, character)| {
                let buffs = character.take_buffs();
                (!buffs.is_empty()).then_some((*id, buffs))
            })
            .collect();

        for (id, mut buffs) in detached {
            buffs.retain_mut(|buff| match buff.tick(self, dt) {
                BuffPhase::Active => true,
                BuffPhase::Expired => {
                    debug!(source = %buff.source(), target = %buff.target(), "buff expired");
                    self.record(CombatEvent::BuffExpired {
                        source: buff.source(),
                        target: buff.target(),
                    });
                    false
                }
            });

            if let Some(character) = self.characters.get_mut(&id) {
                character.restore_buffs(buffs);
            }
        }
    }
}
