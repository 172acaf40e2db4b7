// Column order matches the migrations; additive columns stay last.

diesel::table! {
    users (user_id) {
        user_id -> BigInt,
        username -> Nullable<Text>,
        full_name -> Nullable<Text>,
        gender -> Nullable<Text>,
        age -> Nullable<Integer>,
        height -> Nullable<Double>,
        weight -> Nullable<Double>,
        activity_level -> Nullable<Text>,
        goal -> Nullable<Text>,
        bmr -> Nullable<Double>,
        tdee -> Nullable<Double>,
        calories -> Nullable<Integer>,
        protein -> Nullable<Integer>,
        fat -> Nullable<Integer>,
        carbs -> Nullable<Integer>,
        created_at -> BigInt,
        updated_at -> BigInt,
        water_goal_ml -> Nullable<Integer>,
    }
}

diesel::table! {
    water_log (id) {
        id -> Integer,
        user_id -> BigInt,
        amount_ml -> Integer,
        logged_day -> Text,
        logged_at -> BigInt,
    }
}

diesel::table! {
    mood_log (id) {
        id -> Integer,
        user_id -> BigInt,
        emoji -> Text,
        note -> Nullable<Text>,
        logged_day -> Text,
        logged_at -> BigInt,
    }
}

diesel::table! {
    sleep_log (id) {
        id -> Integer,
        user_id -> BigInt,
        sleep_date -> Text,
        hours -> Double,
        quality -> Nullable<Integer>,
        logged_at -> BigInt,
    }
}

diesel::table! {
    headache_log (id) {
        id -> Integer,
        user_id -> BigInt,
        intensity -> Integer,
        location -> Nullable<Text>,
        triggers -> Nullable<Text>,
        duration_min -> Nullable<Integer>,
        logged_day -> Text,
        logged_at -> BigInt,
    }
}
