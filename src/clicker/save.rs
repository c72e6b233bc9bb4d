//! BMC Clicker セーブ/ロード機能。
//!
//! ## マージ方針
//!
//! セーブデータはフィールド名付きの JSON (camelCase) で保存する。
//! 旧ページ (`bmcBrainrotSave`) が書いた localStorage の値もそのまま読める。
//!
//! ロード時はデフォルト状態の上にフィールド単位でマージする。
//! - トップレベルのスカラー値は、セーブに存在すればデフォルトを上書きする。
//! - アップグレードはデフォルト表の ID ごとに、キー単位でマージする。
//!   新しく追加した ID や欠けたフィールドはデフォルト値のまま残る。
//! - デフォルト表に無い ID は無視する。
//!
//! バージョン番号による互換性チェックは行わない。

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::console;

use super::state::{GameState, Upgrade, UpgradeKind};

/// localStorage のキー。
pub const STORAGE_KEY: &str = "bmcBrainrotSave";

/// オートセーブの間隔 (tick数)。10 ticks/sec × 30秒 = 300 ticks。
pub const AUTOSAVE_INTERVAL: u32 = 300;

/// セーブ/ロードの失敗理由。どちらもゲームを止めない。
#[derive(Clone, Debug, PartialEq)]
pub enum SaveError {
    /// 壊れたデータ、または別形式のデータ。
    Parse(String),
    Serialize(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Parse(e) => write!(f, "save data could not be parsed: {e}"),
            SaveError::Serialize(e) => write!(f, "save data could not be written: {e}"),
        }
    }
}

impl std::error::Error for SaveError {}

/// シリアライズ用のセーブデータ構造体。
/// 全フィールドが Option なので、欠けたフィールドはマージ時にデフォルトへ戻る。
#[derive(Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct GameSave {
    score: Option<f64>,
    click_power: Option<f64>,
    total_clicks: Option<u64>,
    points_per_second: Option<f64>,
    upgrades: Option<BTreeMap<String, UpgradeSave>>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct UpgradeSave {
    owned: Option<u32>,
    base_price: Option<f64>,
    current_price: Option<f64>,
    effect: Option<f64>,
    /// "click" | "passive" | "multiplier"
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// GameState からセーブ用データを抽出する。表示用の名前/説明は含まない。
fn extract_save(state: &GameState) -> GameSave {
    GameSave {
        score: Some(state.score),
        click_power: Some(state.click_power),
        total_clicks: Some(state.total_clicks),
        points_per_second: Some(state.points_per_second),
        upgrades: Some(
            state
                .upgrades
                .iter()
                .map(|u| {
                    (
                        u.id.clone(),
                        UpgradeSave {
                            owned: Some(u.owned),
                            base_price: Some(u.base_price),
                            current_price: Some(u.current_price),
                            effect: Some(u.effect),
                            kind: Some(u.kind.tag().to_string()),
                        },
                    )
                })
                .collect(),
        ),
    }
}

/// アップグレード1件をキー単位でマージする。
/// currentPrice が無い場合は basePrice と owned から計算し直す。
fn merge_upgrade(upgrade: &mut Upgrade, save: &UpgradeSave) {
    if let Some(owned) = save.owned {
        upgrade.owned = owned;
    }
    if let Some(base_price) = save.base_price {
        upgrade.base_price = base_price;
    }
    if let Some(effect) = save.effect {
        upgrade.effect = effect;
    }
    if let Some(kind) = save.kind.as_deref().and_then(UpgradeKind::from_tag) {
        upgrade.kind = kind;
    }
    match save.current_price {
        Some(price) => upgrade.current_price = price,
        None => upgrade.reprice(),
    }
}

/// セーブデータを状態にマージする。
fn apply_save(state: &mut GameState, save: &GameSave) {
    if let Some(score) = save.score {
        state.score = score;
    }
    if let Some(click_power) = save.click_power {
        state.click_power = click_power;
    }
    if let Some(total_clicks) = save.total_clicks {
        state.total_clicks = total_clicks;
    }
    if let Some(pps) = save.points_per_second {
        state.points_per_second = pps;
    }

    if let Some(saved) = &save.upgrades {
        for upgrade in &mut state.upgrades {
            if let Some(s) = saved.get(&upgrade.id) {
                merge_upgrade(upgrade, s);
            }
        }
    }
}

/// 状態全体を JSON 文字列にする。
pub fn serialize(state: &GameState) -> Result<String, SaveError> {
    serde_json::to_string(&extract_save(state)).map_err(|e| SaveError::Serialize(e.to_string()))
}

/// デフォルト状態の上に `blob` をマージした状態を返す。
pub fn deserialize(blob: &str) -> Result<GameState, SaveError> {
    deserialize_over(GameState::new(), blob)
}

/// 任意のベース状態の上に `blob` をマージする。
/// パース失敗時は Err を返し、ベース状態は破棄される (呼び出し側の状態は変わらない)。
pub fn deserialize_over(mut base: GameState, blob: &str) -> Result<GameState, SaveError> {
    let save: GameSave =
        serde_json::from_str(blob).map_err(|e| SaveError::Parse(e.to_string()))?;
    apply_save(&mut base, &save);
    Ok(base)
}

// ── Persistence boundary ────────────────────────────────────────

/// 単一キーのセーブスロットを持つ key-value ストア。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&mut self, key: &str) -> Result<(), String>;
}

/// メモリ上のストア。localStorage が使えない環境 (ネイティブ、プライベートモード等) で使う。
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), String> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for web_sys::Storage {
    fn get(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.set_item(key, value).map_err(|e| format!("{e:?}"))
    }

    fn remove(&mut self, key: &str) -> Result<(), String> {
        self.remove_item(key).map_err(|e| format!("{e:?}"))
    }
}

/// localStorage にアクセスする。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
pub fn browser_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// ゲーム状態をストアに保存する。
/// 失敗時はサイレントに無視（コンソールにログ出力）。
pub fn save_game(store: &mut dyn KeyValueStore, state: &GameState) {
    let json = match serialize(state) {
        Ok(j) => j,
        Err(e) => {
            console::warn(&format!("セーブのシリアライズに失敗: {e}"));
            return;
        }
    };
    if let Err(e) = store.set(STORAGE_KEY, &json) {
        console::warn(&format!("ストレージへの保存に失敗: {e}"));
    }
}

/// ストアからゲーム状態を復元する。
/// セーブが無い、またはパースに失敗した場合は false を返し、状態は変更しない。
pub fn load_game(store: &mut dyn KeyValueStore, state: &mut GameState) -> bool {
    let json = match store.get(STORAGE_KEY) {
        Some(j) => j,
        None => return false,
    };

    match deserialize(&json) {
        Ok(loaded) => {
            *state = loaded;
            true
        }
        Err(e) => {
            console::warn(&format!("{e}（破棄します）"));
            // 壊れたデータを削除
            delete_save(store);
            false
        }
    }
}

/// セーブデータを削除する。削除に失敗した場合は警告を出して false を返す。
pub fn delete_save(store: &mut dyn KeyValueStore) -> bool {
    match store.remove(STORAGE_KEY) {
        Ok(()) => true,
        Err(e) => {
            console::warn(&format!("ストレージからの削除に失敗: {e}"));
            false
        }
    }
}

/// 定期チェックポイントのタイマー。
pub struct Autosave {
    ticks_since_save: u32,
}

impl Autosave {
    pub fn new() -> Self {
        Self { ticks_since_save: 0 }
    }

    /// `ticks` 進めて、保存すべきタイミングなら true を返す。
    pub fn advance(&mut self, ticks: u32) -> bool {
        self.ticks_since_save = self.ticks_since_save.saturating_add(ticks);
        if self.ticks_since_save >= AUTOSAVE_INTERVAL {
            self.ticks_since_save = 0;
            true
        } else {
            false
        }
    }

    /// 手動保存やリセットの後にカウントをやり直す。
    pub fn restart(&mut self) {
        self.ticks_since_save = 0;
    }
}
