use super::enums::TreeStage;

/// Growth stage for a task's completed/target session ratio
///
/// Quarter steps: below 25% is a seed, 100% and beyond is mature.
/// A zero target never divides and stays a seed.
pub fn tree_stage(completed: u32, total: u32) -> TreeStage {
    if total == 0 {
        return TreeStage::Seed;
    }

    // Compare in integers: completed / total >= n / 4  <=>  4 * completed >= n * total
    let scaled = u64::from(completed) * 4;
    let total = u64::from(total);
    if scaled >= 4 * total {
        TreeStage::Mature
    } else if scaled >= 3 * total {
        TreeStage::Young
    } else if scaled >= 2 * total {
        TreeStage::Sapling
    } else if scaled >= total {
        TreeStage::Sprout
    } else {
        TreeStage::Seed
    }
}

/// Choose tree glyph for a growth stage
pub fn stage_glyph(stage: TreeStage, use_emoji: bool) -> &'static str {
    if use_emoji {
        match stage {
            TreeStage::Seed => "🌰",
            TreeStage::Sprout => "🌱",
            TreeStage::Sapling => "🌿",
            TreeStage::Young => "🪴",
            TreeStage::Mature => "🌳",
        }
    } else {
        match stage {
            TreeStage::Seed => ".",
            TreeStage::Sprout => "i",
            TreeStage::Sapling => "Y",
            TreeStage::Young => "T",
            TreeStage::Mature => "#",
        }
    }
}

/// Multi-line ASCII drawing of a tree for the timer view
pub fn stage_art(stage: TreeStage) -> &'static [&'static str] {
    match stage {
        TreeStage::Seed => &["", "", "", "", "    .    ", "~~~~~~~~~"],
        TreeStage::Sprout => &["", "", "", "   \\|/   ", "    |    ", "~~~~~~~~~"],
        TreeStage::Sapling => &["", "", "   \\ /   ", "  --Y--  ", "    |    ", "~~~~~~~~~"],
        TreeStage::Young => &["", "   ***   ", "  *****  ", "   *|*   ", "    |    ", "~~~~~~~~~"],
        TreeStage::Mature => &[
            "   ***   ",
            " ******* ",
            "*********",
            " ***|*** ",
            "    |    ",
            "~~~~~~~~~",
        ],
    }
}
