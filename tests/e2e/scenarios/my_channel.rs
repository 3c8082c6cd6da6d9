use crate::harness::{ChannelTab, Control, ListId, Page, Scenario, SignalId};
use serde_json::json;
use std::time::Duration;

fn my_channel() -> Scenario {
    Scenario::new("my_channel")
        .open(Page::MyChannel)
        .wait_for_value("edit_channel_page.channel_overview")
}

#[test]
fn test_channel_overview_arrives() {
    my_channel()
        .assert_last_wait_ticks(4)
        .assert_value_equals("edit_channel_page.channel_overview.name", json!("My channel"))
        .assert_value_equals("edit_channel_page.channel_overview.torrents", json!(6))
        .run()
        .unwrap();
}

#[test]
fn test_edit_channel_torrents() {
    my_channel()
        .open_channel_tab(ChannelTab::Torrents)
        .wait_for_list(ListId::EditChannelTorrents)
        .assert_list_count(ListId::EditChannelTorrents, 6)
        .run()
        .unwrap();
}

#[test]
fn test_playlists_loaded_signal() {
    my_channel()
        .open_channel_tab(ChannelTab::Playlists)
        .wait_for_signal(SignalId::PlaylistsLoaded)
        .assert_list_count(ListId::EditChannelPlaylists, 2)
        .assert_first_row(ListId::EditChannelPlaylists, "Favourites")
        .run()
        .unwrap();
}

#[test]
fn test_create_playlist() {
    my_channel()
        .open_channel_tab(ChannelTab::Playlists)
        .wait_for_list(ListId::EditChannelPlaylists)
        .click_and_await(
            Control::SavePlaylist {
                name: "Documentaries".into(),
                description: "Long form".into(),
            },
            SignalId::PlaylistsLoaded,
        )
        .assert_list_count(ListId::EditChannelPlaylists, 3)
        .run()
        .unwrap();
}

#[test]
fn test_edit_existing_playlist_keeps_count() {
    my_channel()
        .open_channel_tab(ChannelTab::Playlists)
        .wait_for_list(ListId::EditChannelPlaylists)
        .click_and_await(
            Control::SavePlaylist {
                name: "Favourites".into(),
                description: "Renamed description".into(),
            },
            SignalId::PlaylistsLoaded,
        )
        .assert_list_count(ListId::EditChannelPlaylists, 2)
        .run()
        .unwrap();
}

#[test]
fn test_remove_playlist() {
    my_channel()
        .open_channel_tab(ChannelTab::Playlists)
        .wait_for_list(ListId::EditChannelPlaylists)
        .click_and_await(Control::RemovePlaylist(0), SignalId::PlaylistsLoaded)
        .assert_list_count(ListId::EditChannelPlaylists, 1)
        .assert_first_row(ListId::EditChannelPlaylists, "Lectures")
        .run()
        .unwrap();
}

#[test]
fn test_rss_feeds() {
    my_channel()
        .open_channel_tab(ChannelTab::RssFeeds)
        .wait_for_list(ListId::EditChannelRssFeeds)
        .click(Control::AddRssFeed("http://example.org/other.xml".into()))
        .idle(Duration::from_secs(1))
        .assert_list_count(ListId::EditChannelRssFeeds, 2)
        .click(Control::RemoveRssFeed(0))
        .idle(Duration::from_secs(1))
        .assert_list_count(ListId::EditChannelRssFeeds, 1)
        .assert_first_row(ListId::EditChannelRssFeeds, "http://example.org/other.xml")
        .run()
        .unwrap();
}
