//! Typed skeleton binding
//!
//! Bones the animator drives are looked up once, when the model arrives,
//! from a role -> bone-name table. Roles missing from the model are
//! reported instead of silently left unbound.

use serde::{Deserialize, Serialize};

use super::assets::ModelHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoneRole {
    Root,
    LeftLeg,
    RightLeg,
    LeftArm,
    RightArm,
}

impl BoneRole {
    pub const ALL: [BoneRole; 5] = [
        BoneRole::Root,
        BoneRole::LeftLeg,
        BoneRole::RightLeg,
        BoneRole::LeftArm,
        BoneRole::RightArm,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Bone names of the player character's skeleton
pub const CHARACTER_BONES: [(BoneRole, &str); 5] = [
    (BoneRole::Root, "J_root_04"),
    (BoneRole::LeftLeg, "J_momo_L_026"),
    (BoneRole::RightLeg, "J_momo_R_031"),
    (BoneRole::LeftArm, "J_ude_L_017"),
    (BoneRole::RightArm, "J_ude_R_022"),
];

/// Resolved role -> bone handle mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rig {
    bones: [Option<u32>; 5],
}

impl Rig {
    /// Bind every role in `table` to the first bone with that exact name
    pub fn resolve(model: &ModelHandle, table: &[(BoneRole, &str)]) -> Self {
        let mut rig = Self::default();
        for (role, name) in table {
            rig.bones[role.index()] = model
                .bones
                .iter()
                .find(|b| b.name == *name)
                .map(|b| b.handle);
        }
        rig
    }

    #[inline]
    pub fn get(&self, role: BoneRole) -> Option<u32> {
        self.bones[role.index()]
    }

    #[inline]
    pub fn has(&self, role: BoneRole) -> bool {
        self.get(role).is_some()
    }

    /// Roles left unbound after resolution
    pub fn missing(&self) -> Vec<BoneRole> {
        BoneRole::ALL
            .into_iter()
            .filter(|r| !self.has(*r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_resolve_full_skeleton() {
        let mut model = ModelHandle::new(1);
        for (i, (_, name)) in CHARACTER_BONES.iter().enumerate() {
            model = model.with_bone(name, 10 + i as u32, Vec3::ZERO);
        }
        let rig = Rig::resolve(&model, &CHARACTER_BONES);
        assert!(rig.missing().is_empty());
        assert_eq!(rig.get(BoneRole::Root), Some(10));
        assert_eq!(rig.get(BoneRole::RightArm), Some(14));
    }

    #[test]
    fn test_resolve_reports_missing_roles() {
        let model = ModelHandle::new(1)
            .with_bone("J_momo_L_026", 3, Vec3::ZERO)
            .with_bone("J_momo_R_031", 4, Vec3::ZERO)
            .with_bone("Tail", 5, Vec3::ZERO);
        let rig = Rig::resolve(&model, &CHARACTER_BONES);
        assert_eq!(
            rig.missing(),
            vec![BoneRole::Root, BoneRole::LeftArm, BoneRole::RightArm]
        );
        assert!(rig.has(BoneRole::LeftLeg));
    }
}
