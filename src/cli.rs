use clap::{Parser, Subcommand};
use photoclean_common::{Resolution, ResolutionFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photoclean")]
#[command(about = "AI写真オブジェクト除去スタジオ", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// サインインしてクレジットを受け取る
    Login,

    /// サインアウト（ユーザー・履歴・残高を削除）
    Logout,

    /// ユーザー・残高・履歴件数を表示
    Status,

    /// 画像から指定したオブジェクトを除去
    Edit {
        /// 画像ファイルのパス、または画像URL
        #[arg(required = true)]
        source: String,

        /// 除去したいもの（例: "remove the hat"）
        #[arg(short, long, required = true)]
        prompt: String,

        /// 出力解像度 (1K/2K/4K)
        #[arg(short, long, default_value = "1K")]
        resolution: Resolution,

        /// 編集結果の保存先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 編集履歴を表示
    History {
        /// 名前で検索（大文字小文字を区別しない）
        #[arg(short, long, default_value = "")]
        search: String,

        /// 解像度で絞込み (ALL/1K/2K/4K)
        #[arg(short, long, default_value = "ALL")]
        resolution: ResolutionFilter,
    },

    /// 履歴から1件削除
    Delete {
        /// レコードID
        #[arg(required = true)]
        id: String,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
