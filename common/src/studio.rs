//! スタジオ（画面遷移・編集・履歴）の状態管理
//!
//! 画面はボタン操作でそのまま遷移する。ガードは残高・プロンプト・URL・APIキーの4つのみ。
//! 状態の変更は `SessionStore` へ書き戻す（書き込み失敗はログのみ）。

use url::Url;

use crate::credits::CreditState;
use crate::edit::{synthesize_with_gate, EditOutcome, EditTicket, ImageEditor, ImageSource, KeyGate};
use crate::error::{EditError, Result, StudioError};
use crate::gallery::{self, ResolutionFilter, RECENT_LIMIT};
use crate::storage::{KeyValueStore, SessionStore};
use crate::types::{ImageRecord, Preferences, Resolution, User, View, REMOTE_ASSET_NAME};

/// モックサインインの待ち時間（ミリ秒）
pub const MOCK_SIGN_IN_DELAY_MS: u32 = 1200;

/// 永続化されない作業状態を含む、セッションの全状態
#[derive(Debug, Clone, Default)]
struct StudioState {
    /// ログアウト・エディタ終了ごとに進む。古い `EditTicket` の判定に使う。
    generation: u64,
    view: View,
    user: Option<User>,
    credits: CreditState,
    history: Vec<ImageRecord>,
    pending_preferences: Option<Preferences>,

    // エディタ
    current: Option<ImageRecord>,
    edited: Option<ImageRecord>,
    prompt: String,
    resolution: Resolution,
    error: Option<String>,
    busy: bool,

    // ギャラリー
    search_query: String,
    gallery_filter: ResolutionFilter,
    selected: Option<String>,
}

/// `complete_edit` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCompletion {
    pub result: std::result::Result<ImageRecord, StudioError>,
    /// ホストのキー選択を開き直す
    pub reopen_key_picker: bool,
}

#[derive(Debug)]
pub struct Studio<S> {
    session: SessionStore<S>,
    state: StudioState,
}

impl<S: KeyValueStore> Studio<S> {
    /// 保存済みの状態を読まずに開始
    pub fn new(store: S) -> Self {
        Self {
            session: SessionStore::new(store),
            state: StudioState::default(),
        }
    }

    /// 保存済みのユーザー・履歴・残高から復元
    ///
    /// ユーザーがいればダッシュボードから開始する。残高の記録がなければ満額とする。
    pub fn restore(store: S) -> Result<Self> {
        let mut studio = Self::new(store);
        let snapshot = studio.session.load()?;

        studio.state.history = snapshot.history;
        if let Some(user) = snapshot.user {
            studio.state.credits = snapshot.credits.unwrap_or_else(CreditState::claimed);
            studio.state.user = Some(user);
            studio.state.view = View::Dashboard;
        }
        tracing::debug!(
            signed_in = studio.state.user.is_some(),
            history = studio.state.history.len(),
            "studio restored"
        );
        Ok(studio)
    }

    pub fn store(&self) -> &S {
        self.session.inner()
    }

    // =============================================
    // 参照
    // =============================================

    pub fn view(&self) -> View {
        self.state.view
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn credits(&self) -> CreditState {
        self.state.credits
    }

    pub fn history(&self) -> &[ImageRecord] {
        &self.state.history
    }

    pub fn recent(&self) -> &[ImageRecord] {
        gallery::recent(&self.state.history, RECENT_LIMIT)
    }

    pub fn current_image(&self) -> Option<&ImageRecord> {
        self.state.current.as_ref()
    }

    pub fn edited_image(&self) -> Option<&ImageRecord> {
        self.state.edited.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.state.prompt
    }

    pub fn resolution(&self) -> Resolution {
        self.state.resolution
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    pub fn gallery_filter(&self) -> ResolutionFilter {
        self.state.gallery_filter
    }

    pub fn filtered_history(&self) -> Vec<&ImageRecord> {
        gallery::filter_history(
            &self.state.history,
            &self.state.search_query,
            self.state.gallery_filter,
        )
    }

    pub fn selected_record(&self) -> Option<&ImageRecord> {
        let id = self.state.selected.as_deref()?;
        self.state.history.iter().find(|record| record.id == id)
    }

    /// 実行ボタンを押せるか
    pub fn can_execute_edit(&self) -> bool {
        !self.state.busy && self.state.current.is_some() && !self.state.prompt.trim().is_empty()
    }

    /// 選択中の解像度の費用を払えるか
    pub fn can_afford_selected(&self) -> bool {
        self.state.credits.can_afford(self.state.resolution.cost())
    }

    // =============================================
    // 画面遷移・サインイン
    // =============================================

    pub fn open_auth(&mut self) {
        self.state.view = View::Auth;
    }

    /// サイドバーからの遷移（表示中の編集結果は閉じる）
    pub fn navigate(&mut self, view: View) {
        tracing::debug!(from = ?self.state.view, to = ?view, "navigate");
        self.state.view = view;
        self.state.edited = None;
    }

    /// エディタを閉じてダッシュボードへ（取込んだ画像も破棄）
    pub fn back_to_dashboard(&mut self) {
        self.advance_generation();
        self.state.busy = false;
        self.state.view = View::Dashboard;
        self.state.current = None;
        self.state.edited = None;
        self.state.error = None;
    }

    pub fn begin_sign_in(&mut self) {
        self.state.busy = true;
    }

    /// `MOCK_SIGN_IN_DELAY_MS` 待ったあとに呼ぶ
    pub fn finish_sign_in(&mut self) {
        self.state.busy = false;
        self.state.view = View::Onboarding;
    }

    pub fn complete_onboarding(&mut self, preferences: Option<Preferences>) {
        self.state.pending_preferences = preferences;
        self.state.view = View::ClaimCredits;
    }

    pub fn claim_credits(&mut self) {
        let user = User::placeholder(self.state.pending_preferences.take());
        self.state.credits = CreditState::claimed();
        if let Err(e) = self.session.save_user(&user) {
            tracing::warn!(error = %e, "failed to persist user");
        }
        self.persist_credits();
        self.state.user = Some(user);
        self.state.view = View::Dashboard;
    }

    /// ストア・履歴・残高・作業状態をすべて破棄してランディングへ
    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
        self.state = StudioState {
            generation: self.state.generation.wrapping_add(1),
            ..StudioState::default()
        };
    }

    // =============================================
    // 取込み
    // =============================================

    /// ローカルファイル（data URL に読み込み済み）を取り込む
    pub fn import_local(&mut self, name: &str, data_url: String, now_ms: i64) {
        self.open_in_editor(ImageRecord::imported(name, data_url, now_ms));
    }

    /// URLを検証して取り込む。空入力は何もしない。
    ///
    /// 不正なURLは画面を変えずにエラーメッセージを出す。
    pub fn import_remote(&mut self, input: &str, now_ms: i64) -> std::result::Result<(), StudioError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }
        if Url::parse(input).is_err() {
            return Err(self.reject(StudioError::InvalidUrl));
        }
        self.open_in_editor(ImageRecord::imported(REMOTE_ASSET_NAME, input, now_ms));
        Ok(())
    }

    /// 履歴のレコードをエディタで開き直す
    pub fn reopen_record(&mut self, id: &str) -> bool {
        let Some(record) = self.state.history.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.state.selected = None;
        self.open_in_editor(record);
        true
    }

    /// 編集結果を次の編集の元画像にする（プロンプトは空に戻す）
    pub fn refine_again(&mut self) {
        if let Some(edited) = self.state.edited.take() {
            self.state.current = Some(edited);
            self.state.prompt.clear();
            self.state.error = None;
        }
    }

    fn open_in_editor(&mut self, record: ImageRecord) {
        tracing::debug!(id = %record.id, name = %record.name, "image imported");
        self.state.current = Some(record);
        self.state.edited = None;
        self.state.error = None;
        self.state.view = View::Editor;
    }

    // =============================================
    // 編集
    // =============================================

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.state.prompt = prompt.into();
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.state.resolution = resolution;
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    /// 編集ガード（実行中・入力・残高）を確認し、通れば実行中にする
    pub fn request_edit(&mut self) -> std::result::Result<EditTicket, StudioError> {
        if self.state.busy {
            return Err(StudioError::EditInFlight);
        }
        let source = match (&self.state.current, self.state.prompt.trim().is_empty()) {
            (Some(source), false) => source.clone(),
            _ => return Err(StudioError::NothingToEdit),
        };

        let resolution = self.state.resolution;
        let cost = resolution.cost();
        if !self.state.credits.can_afford(cost) {
            let remaining = self.state.credits.remaining();
            return Err(self.reject(StudioError::InsufficientCredits {
                required: cost,
                remaining,
            }));
        }

        self.state.busy = true;
        self.state.error = None;
        Ok(EditTicket {
            generation: self.state.generation,
            source,
            prompt: self.state.prompt.clone(),
            resolution,
            cost,
        })
    }

    /// 2K/4KでAPIキー未選択のとき、編集せずに中断する
    pub fn abort_for_missing_key(&mut self, ticket: &EditTicket) -> StudioError {
        if self.is_stale(ticket) {
            return StudioError::SessionChanged;
        }
        self.state.busy = false;
        self.reject(StudioError::MissingApiKey)
    }

    /// 編集結果を反映する
    ///
    /// 成功時: 残高を差し引き、履歴の先頭に追加して保存。
    /// 失敗時: メッセージを出すだけで他の状態は変えない。
    /// 発行後にセッションが変わっていれば何も反映しない。
    pub fn finish_edit(
        &mut self,
        ticket: EditTicket,
        outcome: std::result::Result<String, EditError>,
        now_ms: i64,
    ) -> std::result::Result<ImageRecord, StudioError> {
        if self.is_stale(&ticket) {
            tracing::debug!(
                issued = ticket.generation,
                current = self.state.generation,
                "discarding edit from a previous session"
            );
            return Err(StudioError::SessionChanged);
        }
        self.state.busy = false;

        let result_url = match outcome {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, resolution = %ticket.resolution, "image synthesis failed");
                return Err(self.reject(StudioError::Synthesis(e)));
            }
        };

        if let Err(e) = self.state.credits.spend(ticket.cost) {
            return Err(self.reject(e));
        }

        let record = ImageRecord::edited(
            &ticket.source,
            result_url,
            &ticket.prompt,
            ticket.resolution,
            now_ms,
        );
        tracing::debug!(id = %record.id, cost = ticket.cost, "edit stored");
        self.state.history.insert(0, record.clone());
        self.state.edited = Some(record.clone());
        self.persist_history();
        self.persist_credits();
        Ok(record)
    }

    /// `synthesize_with_gate` の結果を反映する
    pub fn complete_edit(&mut self, ticket: EditTicket, outcome: EditOutcome, now_ms: i64) -> EditCompletion {
        let reopen = outcome.reopens_key_picker() && !self.is_stale(&ticket);
        let result = match outcome {
            EditOutcome::MissingKey => Err(self.abort_for_missing_key(&ticket)),
            EditOutcome::Synthesized(outcome) => self.finish_edit(ticket, outcome, now_ms),
        };
        EditCompletion {
            result,
            reopen_key_picker: reopen,
        }
    }

    /// ガード確認 → APIキー確認 → 合成 → 反映 までを通しで実行
    ///
    /// キー未選択・キーが見つからない場合はホストのキー選択を開く。
    pub async fn execute_edit<G, I, E>(
        &mut self,
        gate: &G,
        source: &I,
        editor: &E,
        clock: impl Fn() -> i64,
    ) -> std::result::Result<ImageRecord, StudioError>
    where
        G: KeyGate,
        I: ImageSource,
        E: ImageEditor,
    {
        let ticket = self.request_edit()?;
        let outcome = synthesize_with_gate(&ticket, gate, source, editor).await;
        let completion = self.complete_edit(ticket, outcome, clock());
        if completion.reopen_key_picker {
            gate.open_select_key().await;
        }
        completion.result
    }

    // =============================================
    // ギャラリー
    // =============================================

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    pub fn set_gallery_filter(&mut self, filter: ResolutionFilter) {
        self.state.gallery_filter = filter;
    }

    pub fn select_record(&mut self, id: &str) {
        self.state.selected = Some(id.to_string());
    }

    pub fn close_record(&mut self) {
        self.state.selected = None;
    }

    /// 履歴から1件削除。詳細表示中のレコードなら詳細を閉じる。
    pub fn delete_record(&mut self, id: &str) -> Option<ImageRecord> {
        let removed = gallery::remove_record(&mut self.state.history, id)?;
        if self.state.selected.as_deref() == Some(id) {
            self.state.selected = None;
        }
        self.persist_history();
        Some(removed)
    }

    // =============================================
    // 内部
    // =============================================

    fn is_stale(&self, ticket: &EditTicket) -> bool {
        ticket.generation != self.state.generation
    }

    fn advance_generation(&mut self) {
        self.state.generation = self.state.generation.wrapping_add(1);
    }

    fn reject(&mut self, error: StudioError) -> StudioError {
        if !error.is_silent() {
            self.state.error = Some(error.to_string());
        }
        tracing::debug!(error = ?error, "operation rejected");
        error
    }

    fn persist_history(&mut self) {
        if let Err(e) = self.session.save_history(&self.state.history) {
            tracing::warn!(error = %e, "failed to persist history");
        }
    }

    fn persist_credits(&mut self) {
        if let Err(e) = self.session.save_credits(&self.state.credits) {
            tracing::warn!(error = %e, "failed to persist credits");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, CREDITS_KEY, HISTORY_KEY, USER_KEY};

    fn signed_in() -> Studio<MemoryStore> {
        let mut studio = Studio::new(MemoryStore::new());
        studio.open_auth();
        studio.begin_sign_in();
        studio.finish_sign_in();
        studio.complete_onboarding(None);
        studio.claim_credits();
        studio
    }

    fn with_image(studio: &mut Studio<MemoryStore>) {
        studio.import_local("cat.png", "data:image/png;base64,iVBORw0KGgo=".to_string(), 100);
        studio.set_prompt("remove the hat");
    }

    #[test]
    fn test_sign_in_funnel() {
        let mut studio = Studio::new(MemoryStore::new());
        assert_eq!(studio.view(), View::Landing);

        studio.open_auth();
        studio.begin_sign_in();
        assert!(studio.is_busy());
        studio.finish_sign_in();
        assert!(!studio.is_busy());
        assert_eq!(studio.view(), View::Onboarding);

        let preferences = Preferences {
            use_case: "Product Photography".to_string(),
            expertise: "Professional".to_string(),
        };
        studio.complete_onboarding(Some(preferences.clone()));
        assert_eq!(studio.view(), View::ClaimCredits);

        studio.claim_credits();
        assert_eq!(studio.view(), View::Dashboard);
        assert_eq!(studio.credits(), CreditState::claimed());
        let user = studio.user().expect("ユーザーあり");
        assert_eq!(user.preferences, Some(preferences));
        assert!(studio.store().contains(USER_KEY));
    }

    #[test]
    fn test_import_local_opens_editor() {
        let mut studio = signed_in();
        with_image(&mut studio);
        assert_eq!(studio.view(), View::Editor);
        let current = studio.current_image().expect("画像あり");
        assert_eq!(current.name, "cat.png");
        assert_eq!(current.id, "100");
        assert!(current.resolution.is_none());
    }

    #[test]
    fn test_import_remote_rejects_invalid_url() {
        let mut studio = signed_in();
        let err = studio.import_remote("not-a-url", 1).unwrap_err();
        assert_eq!(err, StudioError::InvalidUrl);
        assert_eq!(studio.view(), View::Dashboard);
        assert_eq!(studio.error(), Some("The provided URL is invalid."));
        assert!(studio.current_image().is_none());
    }

    #[test]
    fn test_import_remote_blank_is_noop() {
        let mut studio = signed_in();
        studio.import_remote("   ", 1).expect("空入力は無視");
        assert_eq!(studio.view(), View::Dashboard);
        assert!(studio.error().is_none());
    }

    #[test]
    fn test_import_remote_valid_url() {
        let mut studio = signed_in();
        studio
            .import_remote("https://images.example.com/beach.jpg", 7)
            .expect("有効なURL");
        assert_eq!(studio.view(), View::Editor);
        let current = studio.current_image().expect("画像あり");
        assert_eq!(current.name, "Remote Asset");
        assert!(!current.is_embedded());
    }

    #[test]
    fn test_request_edit_requires_prompt() {
        let mut studio = signed_in();
        studio.import_local("cat.png", "data:image/png;base64,AA".to_string(), 1);
        assert!(!studio.can_execute_edit());
        assert_eq!(studio.request_edit(), Err(StudioError::NothingToEdit));
        assert!(studio.error().is_none());
    }

    #[test]
    fn test_request_edit_rejects_second_request() {
        let mut studio = signed_in();
        with_image(&mut studio);
        studio.request_edit().expect("1回目は通る");
        assert_eq!(studio.request_edit(), Err(StudioError::EditInFlight));
    }

    #[test]
    fn test_successful_edit_updates_history_and_credits() {
        let mut studio = signed_in();
        with_image(&mut studio);
        studio.set_resolution(Resolution::TwoK);

        let ticket = studio.request_edit().expect("ガード通過");
        assert!(studio.is_busy());
        let record = studio
            .finish_edit(ticket, Ok("data:image/png;base64,RE9ORQ==".to_string()), 200)
            .expect("反映成功");

        assert!(!studio.is_busy());
        assert_eq!(studio.credits().remaining(), 8);
        assert_eq!(studio.history()[0], record);
        assert_eq!(studio.edited_image(), Some(&record));
        assert_eq!(record.original_url.as_deref(), Some("data:image/png;base64,iVBORw0KGgo="));
        assert!(studio.store().contains(HISTORY_KEY));
        assert!(studio.store().contains(CREDITS_KEY));
    }

    #[test]
    fn test_failed_edit_leaves_state() {
        let mut studio = signed_in();
        with_image(&mut studio);
        let ticket = studio.request_edit().expect("ガード通過");

        let err = studio
            .finish_edit(ticket, Err(EditError::NoImageData), 200)
            .unwrap_err();

        assert_eq!(err, StudioError::Synthesis(EditError::NoImageData));
        assert_eq!(studio.error(), Some("Synthesis failed. Check your API key or connection."));
        assert_eq!(studio.credits(), CreditState::claimed());
        assert!(studio.history().is_empty());
        assert!(!studio.is_busy());
    }

    #[test]
    fn test_missing_key_abort() {
        let mut studio = signed_in();
        with_image(&mut studio);
        studio.set_resolution(Resolution::FourK);
        let ticket = studio.request_edit().expect("ガード通過");

        let err = studio.abort_for_missing_key(&ticket);
        assert_eq!(err, StudioError::MissingApiKey);
        assert!(!studio.is_busy());
        assert_eq!(studio.credits().remaining(), 10);
    }

    #[test]
    fn test_edit_outstanding_across_logout_is_discarded() {
        let mut studio = signed_in();
        with_image(&mut studio);
        let first = studio.request_edit().expect("ガード通過");

        studio.logout();
        studio.open_auth();
        studio.begin_sign_in();
        studio.finish_sign_in();
        studio.complete_onboarding(None);
        studio.claim_credits();
        studio.import_local("dog.png", "data:image/png;base64,RE9H".to_string(), 300);
        studio.set_prompt("remove the leash");
        let second = studio.request_edit().expect("新しいセッションでは通る");
        assert_eq!(second.source.name, "dog.png");

        let err = studio
            .finish_edit(first, Ok("data:image/png;base64,AA".to_string()), 400)
            .unwrap_err();
        assert_eq!(err, StudioError::SessionChanged);
        assert!(studio.history().is_empty());
        assert_eq!(studio.credits(), CreditState::claimed());
        assert!(!studio.store().contains(HISTORY_KEY));
        assert!(studio.is_busy());
        assert!(studio.error().is_none());
        assert_eq!(studio.request_edit(), Err(StudioError::EditInFlight));

        let record = studio
            .finish_edit(second, Ok("data:image/png;base64,RE9ORQ==".to_string()), 500)
            .expect("反映成功");
        assert_eq!(record.name, "Cleaned dog.png");
        assert_eq!(studio.history().len(), 1);
        assert_eq!(studio.credits().remaining(), 9);
        assert!(!studio.is_busy());
    }

    #[test]
    fn test_edit_outstanding_across_exit_is_discarded() {
        let mut studio = signed_in();
        with_image(&mut studio);
        let first = studio.request_edit().expect("ガード通過");

        studio.back_to_dashboard();
        assert!(!studio.is_busy());
        studio.import_local("dog.png", "data:image/png;base64,RE9H".to_string(), 300);

        let err = studio
            .finish_edit(first, Ok("data:image/png;base64,AA".to_string()), 400)
            .unwrap_err();
        assert_eq!(err, StudioError::SessionChanged);
        assert!(studio.edited_image().is_none());
        assert_eq!(studio.current_image().map(|r| r.name.as_str()), Some("dog.png"));
        assert!(studio.history().is_empty());
    }

    #[test]
    fn test_stale_missing_key_does_not_reopen_picker() {
        let mut studio = signed_in();
        with_image(&mut studio);
        studio.set_resolution(Resolution::TwoK);
        let ticket = studio.request_edit().expect("ガード通過");
        studio.logout();

        let completion = studio.complete_edit(ticket, EditOutcome::MissingKey, 1);
        assert_eq!(completion.result, Err(StudioError::SessionChanged));
        assert!(!completion.reopen_key_picker);
        assert!(studio.error().is_none());
    }

    #[test]
    fn test_complete_edit_key_not_found_reopens_picker() {
        let mut studio = signed_in();
        with_image(&mut studio);
        let ticket = studio.request_edit().expect("ガード通過");

        let completion = studio.complete_edit(
            ticket,
            EditOutcome::Synthesized(Err(EditError::KeyNotFound)),
            1,
        );
        assert_eq!(
            completion.result,
            Err(StudioError::Synthesis(EditError::KeyNotFound))
        );
        assert!(completion.reopen_key_picker);
        assert!(!studio.is_busy());
    }

    #[test]
    fn test_navigate_clears_edited_image() {
        let mut studio = signed_in();
        with_image(&mut studio);
        let ticket = studio.request_edit().expect("ガード通過");
        studio
            .finish_edit(ticket, Ok("data:image/png;base64,AA".to_string()), 2)
            .expect("反映成功");

        studio.navigate(View::Gallery);
        assert_eq!(studio.view(), View::Gallery);
        assert!(studio.edited_image().is_none());
        assert_eq!(studio.history().len(), 1);
    }

    #[test]
    fn test_back_to_dashboard_discards_import() {
        let mut studio = signed_in();
        with_image(&mut studio);

        studio.back_to_dashboard();
        assert_eq!(studio.view(), View::Dashboard);
        assert!(studio.current_image().is_none());
        assert!(!studio.can_execute_edit());
    }

    #[test]
    fn test_reopen_record_loads_into_editor() {
        let mut studio = signed_in();
        with_image(&mut studio);
        let ticket = studio.request_edit().expect("ガード通過");
        let record = studio
            .finish_edit(ticket, Ok("data:image/png;base64,AA".to_string()), 2)
            .expect("反映成功");

        studio.navigate(View::Gallery);
        studio.select_record(&record.id);
        assert!(studio.reopen_record(&record.id));
        assert_eq!(studio.view(), View::Editor);
        assert_eq!(studio.current_image(), Some(&record));
        assert!(studio.selected_record().is_none());

        assert!(!studio.reopen_record("missing"));
    }

    #[test]
    fn test_refine_again_chains_result() {
        let mut studio = signed_in();
        with_image(&mut studio);
        let ticket = studio.request_edit().expect("ガード通過");
        let record = studio
            .finish_edit(ticket, Ok("data:image/png;base64,AA".to_string()), 2)
            .expect("反映成功");

        studio.refine_again();
        assert_eq!(studio.current_image(), Some(&record));
        assert!(studio.edited_image().is_none());
        assert_eq!(studio.prompt(), "");
        assert!(!studio.can_execute_edit());
    }

    #[test]
    fn test_delete_selected_record_closes_detail() {
        let mut studio = signed_in();
        with_image(&mut studio);
        for now in [10, 20] {
            let ticket = studio.request_edit().expect("ガード通過");
            studio
                .finish_edit(ticket, Ok("data:image/png;base64,AA".to_string()), now)
                .expect("反映成功");
        }

        studio.select_record("edit-10");
        assert_eq!(studio.selected_record().map(|r| r.id.as_str()), Some("edit-10"));

        let removed = studio.delete_record("edit-10").expect("削除対象あり");
        assert_eq!(removed.id, "edit-10");
        assert!(studio.selected_record().is_none());
        assert_eq!(studio.history().len(), 1);
        assert_eq!(studio.history()[0].id, "edit-20");
    }

    #[test]
    fn test_delete_other_record_keeps_detail() {
        let mut studio = signed_in();
        with_image(&mut studio);
        for now in [10, 20] {
            let ticket = studio.request_edit().expect("ガード通過");
            studio
                .finish_edit(ticket, Ok("data:image/png;base64,AA".to_string()), now)
                .expect("反映成功");
        }
        studio.select_record("edit-20");
        studio.delete_record("edit-10");
        assert_eq!(studio.selected_record().map(|r| r.id.as_str()), Some("edit-20"));
    }

    #[test]
    fn test_logout_resets_everything() {
        let mut studio = signed_in();
        with_image(&mut studio);
        let ticket = studio.request_edit().expect("ガード通過");
        studio
            .finish_edit(ticket, Ok("data:image/png;base64,AA".to_string()), 2)
            .expect("反映成功");

        studio.logout();

        assert_eq!(studio.view(), View::Landing);
        assert!(studio.user().is_none());
        assert!(studio.history().is_empty());
        assert!(studio.current_image().is_none());
        assert_eq!(studio.credits(), CreditState::signed_out());
        assert!(!studio.store().contains(USER_KEY));
        assert!(!studio.store().contains(HISTORY_KEY));
        assert!(!studio.store().contains(CREDITS_KEY));
    }

    #[test]
    fn test_restore_keeps_spent_balance() {
        let mut studio = signed_in();
        with_image(&mut studio);
        studio.set_resolution(Resolution::FourK);
        let ticket = studio.request_edit().expect("ガード通過");
        studio
            .finish_edit(ticket, Ok("data:image/png;base64,AA".to_string()), 2)
            .expect("反映成功");

        let store = studio.store().clone();
        let restored = Studio::restore(store).expect("復元成功");
        assert_eq!(restored.view(), View::Dashboard);
        assert_eq!(restored.credits().remaining(), 7);
        assert_eq!(restored.history(), studio.history());
    }

    #[test]
    fn test_restore_without_credit_record_grants_full_balance() {
        let mut store = MemoryStore::new();
        let user = serde_json::to_string(&User::placeholder(None)).expect("シリアライズ失敗");
        store.set(USER_KEY, &user).expect("書き込み失敗");

        let studio = Studio::restore(store).expect("復元成功");
        assert_eq!(studio.credits(), CreditState::claimed());
    }

    #[test]
    fn test_restore_anonymous_history_stays_on_landing() {
        let mut store = MemoryStore::new();
        let history = vec![ImageRecord::imported("a.png", "data:image/png;base64,AA", 1)];
        store
            .set(HISTORY_KEY, &serde_json::to_string(&history).expect("シリアライズ失敗"))
            .expect("書き込み失敗");

        let studio = Studio::restore(store).expect("復元成功");
        assert_eq!(studio.view(), View::Landing);
        assert_eq!(studio.history(), history.as_slice());
        assert_eq!(studio.credits(), CreditState::signed_out());
    }

    #[test]
    fn test_gallery_filter_state() {
        let mut studio = signed_in();
        with_image(&mut studio);
        for (now, resolution) in [(1, Resolution::OneK), (2, Resolution::TwoK)] {
            studio.set_resolution(resolution);
            let ticket = studio.request_edit().expect("ガード通過");
            studio
                .finish_edit(ticket, Ok("data:image/png;base64,AA".to_string()), now)
                .expect("反映成功");
        }

        studio.set_gallery_filter(ResolutionFilter::Only(Resolution::TwoK));
        let filtered = studio.filtered_history();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "edit-2");

        studio.set_gallery_filter(ResolutionFilter::All);
        studio.set_search_query("DOG");
        assert!(studio.filtered_history().is_empty());
    }
}
