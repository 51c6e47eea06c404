use stowage::entities::{Action, ContainerSets, Item};
use stowage::mask::FeasibilityMask;

/// Among all placements in `mask`, the one resting deepest, then in the lowest container id,
/// then bottom-left most. Ties are broken by the rotation index.
pub fn deepest_bottom_left(cs: &ContainerSets, item: &Item, mask: &FeasibilityMask) -> Option<Action> {
    mask.actions()
        .filter_map(|action| {
            let layout = &cs.layouts()[action.container_id];
            let z = layout.check_placement(item, action.rotation, (action.x, action.y))?;
            let r_idx = cs.instance().rotation_index(action.rotation)?;
            Some(((z, action.container_id, action.y, action.x, r_idx), action))
        })
        .min_by_key(|(key, _)| *key)
        .map(|(_, action)| action)
}

/// The container to swap for an empty one when `item` fits nowhere: the most utilized one
/// among those able to hold it when empty. `None` if no container type can ever hold `item`.
pub fn replacement_candidate(cs: &ContainerSets, item: &Item) -> Option<usize> {
    cs.layouts()
        .iter()
        .filter(|l| cs.instance().fits_empty(item, &l.container))
        .map(|l| (l.container.id, l.utilization()))
        //highest utilization first, lowest id on ties
        .min_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)))
        .map(|(cid, _)| cid)
}
