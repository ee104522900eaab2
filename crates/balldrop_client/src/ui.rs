//! Launch form: два текстовых поля (X, Y) + кнопка "Drop"
//!
//! Значения полей читаются синхронно в момент клика и уходят в симуляцию
//! как LaunchRequest (нормализация и coercion — на стороне симуляции).

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use balldrop_simulation::LaunchRequest;

/// Максимальная длина текста в поле
const MAX_FIELD_LEN: usize = 12;

const FIELD_IDLE: Color = Color::srgb(0.4, 0.4, 0.4);
const FIELD_FOCUSED: Color = Color::srgb(0.9, 0.9, 0.2);
const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.15);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.25);
const BUTTON_PRESSED: Color = Color::srgb(0.35, 0.55, 0.35);

pub struct LaunchFormPlugin;

impl Plugin for LaunchFormPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FocusedField>()
            .add_systems(Startup, spawn_launch_form)
            .add_systems(Update, (
                focus_clicked_field,
                type_into_focused_field,
                refresh_field_visuals,
                submit_on_drop_click,
            ).chain());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAxis {
    X,
    Y,
}

impl FieldAxis {
    fn label(&self) -> &'static str {
        match self {
            FieldAxis::X => "X",
            FieldAxis::Y => "Y",
        }
    }
}

/// Текстовое поле координаты
#[derive(Component, Debug, Clone)]
pub struct CoordinateField {
    pub axis: FieldAxis,
    pub text: String,
}

/// Text-child поля (показывает "X: 2.5")
#[derive(Component)]
struct FieldText;

#[derive(Component)]
struct DropButton;

/// Какое поле получает ввод с клавиатуры
#[derive(Resource, Debug, Default)]
pub struct FocusedField(pub Option<Entity>);

/// Применить нажатие клавиши к тексту поля. true если текст изменился
///
/// Принимает только символы числа (цифры, знак, точка); остальное игнорируется.
pub fn edit_field_text(text: &mut String, key: &Key) -> bool {
    match key {
        Key::Backspace => text.pop().is_some(),
        Key::Character(chars) => {
            let before = text.len();
            for ch in chars.chars() {
                let numeric = ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.');
                if numeric && text.chars().count() < MAX_FIELD_LEN {
                    text.push(ch);
                }
            }
            text.len() != before
        }
        _ => false,
    }
}

fn field_caption(field: &CoordinateField) -> String {
    format!("{}: {}", field.axis.label(), field.text)
}

fn spawn_launch_form(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        ))
        .with_children(|panel| {
            for axis in [FieldAxis::X, FieldAxis::Y] {
                let field = CoordinateField {
                    axis,
                    text: String::new(),
                };
                let caption = field_caption(&field);

                panel
                    .spawn((
                        Button,
                        field,
                        Node {
                            width: Val::Px(140.0),
                            height: Val::Px(28.0),
                            border: UiRect::all(Val::Px(1.0)),
                            padding: UiRect::horizontal(Val::Px(6.0)),
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BorderColor(FIELD_IDLE),
                        BackgroundColor(BUTTON_IDLE),
                    ))
                    .with_child((
                        Text::new(caption),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        FieldText,
                    ));
            }

            panel
                .spawn((
                    Button,
                    DropButton,
                    Node {
                        width: Val::Px(140.0),
                        height: Val::Px(32.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(BUTTON_IDLE),
                ))
                .with_child((
                    Text::new("Drop"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                ));
        });
}

/// Клик по полю → фокус
fn focus_clicked_field(
    fields: Query<(Entity, &Interaction), (Changed<Interaction>, With<CoordinateField>)>,
    mut focused: ResMut<FocusedField>,
) {
    for (entity, interaction) in fields.iter() {
        if *interaction == Interaction::Pressed {
            focused.0 = Some(entity);
        }
    }
}

fn type_into_focused_field(
    mut keys: EventReader<KeyboardInput>,
    focused: Res<FocusedField>,
    mut fields: Query<&mut CoordinateField>,
) {
    let Some(entity) = focused.0 else {
        keys.clear();
        return;
    };
    let Ok(mut field) = fields.get_mut(entity) else {
        keys.clear();
        return;
    };

    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        // Mut<CoordinateField> помечается changed только при реальном изменении
        let mut text = field.text.clone();
        if edit_field_text(&mut text, &event.logical_key) {
            field.text = text;
        }
    }
}

fn refresh_field_visuals(
    focused: Res<FocusedField>,
    mut fields: Query<(Entity, Ref<CoordinateField>, &Children, &mut BorderColor)>,
    mut texts: Query<&mut Text, With<FieldText>>,
) {
    for (entity, field, children, mut border) in fields.iter_mut() {
        let color = if focused.0 == Some(entity) { FIELD_FOCUSED } else { FIELD_IDLE };
        if border.0 != color {
            border.0 = color;
        }

        if !field.is_changed() {
            continue;
        }
        let child_entities: &[Entity] = &children;
        for &child in child_entities {
            if let Ok(mut text) = texts.get_mut(child) {
                text.0 = field_caption(&field);
            }
        }
    }
}

/// Клик по "Drop" → LaunchRequest из текущих значений полей
fn submit_on_drop_click(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<DropButton>),
    >,
    fields: Query<&CoordinateField>,
    mut launches: EventWriter<LaunchRequest>,
) {
    for (interaction, mut background) in buttons.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                background.0 = BUTTON_PRESSED;

                let text_of = |axis: FieldAxis| {
                    fields
                        .iter()
                        .find(|field| field.axis == axis)
                        .map(|field| field.text.as_str())
                        .unwrap_or("")
                };
                let request = LaunchRequest::from_text(text_of(FieldAxis::X), text_of(FieldAxis::Y));
                launches.write(request);
            }
            Interaction::Hovered => background.0 = BUTTON_HOVERED,
            Interaction::None => background.0 = BUTTON_IDLE,
        }
    }
}
