use bevy::prelude::*;
use bevy::ui::UiScale;

use crate::plugin::{ActiveSurface, RealTimeScale};
use crate::screens::DemoScreen;

#[derive(Component)]
pub struct ScreenTitleText;

#[derive(Component)]
pub struct ScaleText;

pub fn setup_hud(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.08, 0.08, 0.1)),
        ))
        .with_children(|parent| {
            // Panel that visibly grows and shrinks with UiScale
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
                    BorderColor(Color::srgb(0.4, 0.4, 0.5)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new(DemoScreen::default().name()),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        Node {
                            margin: UiRect::bottom(Val::Px(8.0)),
                            ..default()
                        },
                        ScreenTitleText,
                    ));
                    parent.spawn((
                        Text::new("Scale: -"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.7, 0.7, 0.8)),
                        ScaleText,
                    ));
                });

            parent.spawn((
                Text::new(controls_text()),
                TextFont {
                    font_size: 10.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.5, 0.55)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

fn controls_text() -> String {
    let mut lines: Vec<String> = DemoScreen::all()
        .into_iter()
        .map(|s| format!("{:?}: {}", s.hotkey(), s.name()))
        .collect();
    lines.push("Ctrl+Wheel: rescale (Shift for fine steps)".to_string());
    lines.push("Ctrl+N: save current scale as default".to_string());
    lines.join("\n")
}

pub fn update_screen_title(
    state: Res<State<DemoScreen>>,
    mut query: Query<&mut Text, With<ScreenTitleText>>,
) {
    for mut text in &mut query {
        text.0 = state.get().name().to_string();
    }
}

pub fn update_scale_text(
    ui_scale: Res<UiScale>,
    active: Res<ActiveSurface>,
    session: Res<RealTimeScale>,
    mut query: Query<&mut Text, With<ScaleText>>,
) {
    if !ui_scale.is_changed() && !active.is_changed() {
        return;
    }
    let key = active.0.context_key().unwrap_or("-");
    for mut text in &mut query {
        text.0 = format!(
            "Scale: {:.2}  key: {}  session: {:.2}",
            ui_scale.0,
            key,
            session.current()
        );
    }
}
