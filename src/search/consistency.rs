use crate::color::{Assignment, ColorId, ColoringInstance, FixedConstraint, RegionId};

/**
returns true iff coloring `region` with `color` is compatible with the partial
assignment:
 - a region pinned by the fixed constraint only accepts its fixed color
 - no already colored neighbor uses `color`
*/
pub fn is_consistent(
    inst:&dyn ColoringInstance,
    assignment:&Assignment,
    region:RegionId,
    color:ColorId,
    fixed:Option<&FixedConstraint>,
) -> bool {
    if let Some(f) = fixed {
        if f.region == region && f.color != color {
            return false;
        }
    }
    inst.neighbors(region).iter().all(|v| assignment.get(*v) != Some(color))
}
