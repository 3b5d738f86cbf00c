//! Vertical space allocation inside a column.
//!
//! The functions here only see [`Slot`]s, the part of a pane the allocation depends on, in
//! column order. Panes without a surface always get exactly one titlebar. All divisions truncate
//! and leftovers go to the next candidate in column order, so results are deterministic.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the passes Insert makes over the siblings while shrinking them.
pub const MAX_SHRINK_PASSES: usize = 100;

/// Smallest surfaced pane a manual adjustment may leave, in titlebars.
pub const MIN_ADJUST_TITLEBARS: i32 = 3;

/// Vertical extent of a column.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub max_height: i32,
    pub titlebar_height: i32,
    pub spacing: i32,
}

/// One pane, as far as allocation is concerned.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slot {
    pub surfaced: bool,
    pub height: i32,
}

impl Slot {
    #[must_use]
    pub const fn surfaced(height: i32) -> Self {
        Self {
            surfaced: true,
            height,
        }
    }

    #[must_use]
    pub const fn without_surface() -> Self {
        Self {
            surfaced: false,
            height: 0,
        }
    }
}

/// Insert could not free enough room, the column overflows by `shortfall` pixels.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("column overflows by {shortfall}px after inserting a pane")]
pub struct InsufficientSpace {
    pub shortfall: i32,
}

fn as_px(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

impl Extent {
    /// Room left for surfaced panes once titlebars of the other panes and spacing are paid for.
    fn budget(&self, surfaced: usize, without: usize) -> i32 {
        self.max_height
            - as_px(without).saturating_mul(self.titlebar_height)
            - as_px(surfaced).saturating_mul(self.spacing)
    }

    fn floor(&self, slot: &Slot) -> i32 {
        if slot.surfaced {
            MIN_ADJUST_TITLEBARS * self.titlebar_height
        } else {
            self.titlebar_height
        }
    }

    fn pin_titlebars(&self, slots: &mut [Slot]) {
        for slot in slots.iter_mut().filter(|s| !s.surfaced) {
            slot.height = self.titlebar_height;
        }
    }
}

fn counts(slots: &[Slot]) -> (usize, usize) {
    let surfaced = slots.iter().filter(|s| s.surfaced).count();
    (surfaced, slots.len() - surfaced)
}

fn surfaced_sum(slots: &[Slot]) -> i32 {
    slots.iter().filter(|s| s.surfaced).map(|s| s.height).sum()
}

/// Takes `needed` pixels from the surfaced slots taller than `floor`, returns what could not be
/// taken.
fn shrink(slots: &mut [Slot], needed: i32, floor: i32) -> i32 {
    let mut remaining = needed;
    for _ in 0..MAX_SHRINK_PASSES {
        if remaining <= 0 {
            break;
        }
        let eligible = slots
            .iter()
            .filter(|s| s.surfaced && s.height > floor)
            .count();
        if eligible == 0 {
            break;
        }
        let share = (remaining / as_px(eligible)).max(1);
        for slot in slots.iter_mut().filter(|s| s.surfaced && s.height > floor) {
            let take = share.min(slot.height - floor).min(remaining);
            slot.height -= take;
            remaining -= take;
            if remaining == 0 {
                break;
            }
        }
    }
    remaining
}

/// Hands `amount` out over the surfaced slots, the remainder moving on slot by slot.
fn distribute(slots: &mut [Slot], amount: i32) {
    let mut receivers = as_px(slots.iter().filter(|s| s.surfaced).count());
    let mut left = amount;
    for slot in slots.iter_mut().filter(|s| s.surfaced) {
        let share = left / receivers;
        slot.height += share;
        left -= share;
        receivers -= 1;
    }
}

/// Makes room for `new` among `siblings`.
///
/// A surfaced pane asks for an equal share of the column, or for its previous allocation when
/// that is smaller. Siblings taller than the equal share give up the difference and whatever is
/// left at the bottom of the column goes to the new pane.
///
/// # Errors
///
/// When the siblings cannot give up enough room. The new pane still gets at least a titlebar and
/// the column overflows by the reported amount.
pub fn insert(extent: &Extent, siblings: &mut [Slot], new: &mut Slot) -> Result<(), InsufficientSpace> {
    extent.pin_titlebars(siblings);
    let (mut surfaced, mut without) = counts(siblings);
    if new.surfaced {
        surfaced += 1;
    } else {
        without += 1;
    }
    let budget = extent.budget(surfaced, without);
    let equal = if surfaced == 0 {
        budget
    } else {
        budget / as_px(surfaced)
    };

    let required = if !new.surfaced {
        0
    } else if new.height > 0 && new.height < equal {
        new.height
    } else {
        equal
    };
    let needed = surfaced_sum(siblings) + required - budget;
    if needed > 0 {
        shrink(siblings, needed, equal);
    }

    if new.surfaced {
        let slack = budget - surfaced_sum(siblings) - required;
        new.height = (required + slack.max(0)).max(extent.titlebar_height);
    } else {
        new.height = extent.titlebar_height;
    }

    let new_share = if new.surfaced { new.height } else { 0 };
    let overflow = surfaced_sum(siblings) + new_share - budget;
    if overflow > 0 {
        return Err(InsufficientSpace {
            shortfall: overflow,
        });
    }
    Ok(())
}

/// Gives the room a removed pane leaves behind to the surfaced panes that remain.
pub fn remove(extent: &Extent, remaining: &mut [Slot]) {
    extent.pin_titlebars(remaining);
    let (surfaced, without) = counts(remaining);
    if surfaced == 0 {
        return;
    }
    let surplus = extent.budget(surfaced, without) - surfaced_sum(remaining);
    if surplus > 0 {
        distribute(remaining, surplus);
    }
}

/// Grows (or shrinks) the slot at `index` by `delta`, taking the difference from the surfaced
/// slots below it. The last slot also takes whatever is left at the bottom of the column.
///
/// Returns `false`, leaving the slots untouched, when the slot has no surface, would drop below
/// three titlebars or the slots below it would no longer fit.
pub fn adjust(extent: &Extent, slots: &mut [Slot], index: usize, delta: i32) -> bool {
    let Some(target) = slots.get(index).copied() else {
        return false;
    };
    if !target.surfaced {
        return false;
    }
    let Some(height) = target.height.checked_add(delta) else {
        return false;
    };
    if height < extent.floor(&target) {
        return false;
    }
    extent.pin_titlebars(slots);
    let (surfaced, _) = counts(slots);
    let total = extent.max_height - as_px(surfaced).saturating_mul(extent.spacing);
    let above: i32 = slots[..index].iter().map(|s| s.height).sum();
    let floors: i32 = slots[index + 1..].iter().map(|s| extent.floor(s)).sum();
    let below = total - above - height;
    if below < floors {
        return false;
    }

    slots[index].height = height;
    if index + 1 == slots.len() {
        slots[index].height += below.max(0);
        return true;
    }

    let mut carry = delta;
    for slot in slots[index + 1..].iter_mut().filter(|s| s.surfaced) {
        if carry == 0 {
            break;
        }
        if carry < 0 {
            slot.height -= carry;
            carry = 0;
        } else {
            let take = carry.min(slot.height - extent.floor(slot)).max(0);
            slot.height -= take;
            carry -= take;
        }
    }
    true
}

/// Vertical offset of every slot, starting at the top of the column.
#[must_use]
pub fn offsets(extent: &Extent, slots: &[Slot]) -> Vec<i32> {
    let mut y = 0;
    slots
        .iter()
        .map(|slot| {
            let at = y;
            y += slot.height + extent.spacing;
            at
        })
        .collect()
}
