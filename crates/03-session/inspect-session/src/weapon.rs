//! Weapon identities and the per-weapon rules the session machine applies.

/// Counter-Strike weapon identities, numbered as the game numbers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WeaponKind {
    P228 = 1,
    Scout = 3,
    HeGrenade = 4,
    Xm1014 = 5,
    C4 = 6,
    Mac10 = 7,
    Aug = 8,
    SmokeGrenade = 9,
    Elite = 10,
    FiveSeven = 11,
    Ump45 = 12,
    Sg550 = 13,
    Galil = 14,
    Famas = 15,
    Usp = 16,
    Glock18 = 17,
    Awp = 18,
    Mp5Navy = 19,
    M249 = 20,
    M3 = 21,
    M4a1 = 22,
    Tmp = 23,
    G3sg1 = 24,
    Flashbang = 25,
    Deagle = 26,
    Sg552 = 27,
    Ak47 = 28,
    Knife = 29,
    P90 = 30,
}

/// Coarse weapon families used for timing heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponClass {
    Pistol,
    Shotgun,
    Smg,
    Rifle,
    Sniper,
    MachineGun,
    Melee,
    Grenade,
    Bomb,
}

impl WeaponClass {
    /// Seconds a primary attack keeps the weapon busy.
    pub fn attack_busy(self) -> f64 {
        match self {
            WeaponClass::Pistol => 0.3,
            WeaponClass::Shotgun => 0.9,
            WeaponClass::Smg => 0.2,
            WeaponClass::Rifle => 0.25,
            WeaponClass::Sniper => 1.5,
            WeaponClass::MachineGun => 0.25,
            WeaponClass::Melee => 0.5,
            WeaponClass::Grenade | WeaponClass::Bomb => 1.0,
        }
    }
}

/// Busy window used when the weapon cannot be identified.
pub const DEFAULT_ATTACK_BUSY: f64 = 0.3;
/// Busy window covering a silencer attach/detach animation.
pub const SILENCER_TOGGLE_BUSY: f64 = 2.0;
/// Busy window of a knife stab.
pub const KNIFE_STAB_BUSY: f64 = 1.1;

impl WeaponKind {
    /// Maps a game weapon id.
    pub fn from_id(id: u8) -> Option<Self> {
        use WeaponKind::*;
        Some(match id {
            1 => P228,
            3 => Scout,
            4 => HeGrenade,
            5 => Xm1014,
            6 => C4,
            7 => Mac10,
            8 => Aug,
            9 => SmokeGrenade,
            10 => Elite,
            11 => FiveSeven,
            12 => Ump45,
            13 => Sg550,
            14 => Galil,
            15 => Famas,
            16 => Usp,
            17 => Glock18,
            18 => Awp,
            19 => Mp5Navy,
            20 => M249,
            21 => M3,
            22 => M4a1,
            23 => Tmp,
            24 => G3sg1,
            25 => Flashbang,
            26 => Deagle,
            27 => Sg552,
            28 => Ak47,
            29 => Knife,
            30 => P90,
            _ => return None,
        })
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn class(self) -> WeaponClass {
        use WeaponKind::*;
        match self {
            P228 | Elite | FiveSeven | Usp | Glock18 | Deagle => WeaponClass::Pistol,
            Xm1014 | M3 => WeaponClass::Shotgun,
            Mac10 | Ump45 | Mp5Navy | Tmp | P90 => WeaponClass::Smg,
            Aug | Galil | Famas | M4a1 | Sg552 | Ak47 => WeaponClass::Rifle,
            Scout | Sg550 | Awp | G3sg1 => WeaponClass::Sniper,
            M249 => WeaponClass::MachineGun,
            Knife => WeaponClass::Melee,
            HeGrenade | SmokeGrenade | Flashbang => WeaponClass::Grenade,
            C4 => WeaponClass::Bomb,
        }
    }

    /// Grenades and the bomb never inspect.
    pub fn allows_inspect(self) -> bool {
        !matches!(self.class(), WeaponClass::Grenade | WeaponClass::Bomb)
    }

    /// Weapons whose pools are split by silencer attachment.
    pub fn is_silencer_aware(self) -> bool {
        matches!(self, WeaponKind::Usp | WeaponKind::M4a1)
    }

    /// Seconds an attack keeps the weapon busy.
    pub fn attack_busy(self, secondary: bool) -> f64 {
        if secondary && self.is_silencer_aware() {
            SILENCER_TOGGLE_BUSY
        } else if secondary && self == WeaponKind::Knife {
            KNIFE_STAB_BUSY
        } else {
            self.class().attack_busy()
        }
    }
}
