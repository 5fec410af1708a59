// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 项目画廊控制台
//!
//! 以命令行方式驱动四个页面控制器：
//! - 画廊：浏览、筛选、搜索可见项目
//! - 提交：逐项输入表单并提交新项目
//! - 编辑：凭邮箱查找并修改自己的项目
//! - 管理：连续输入 `logo` 触发秘密手势后登录，切换可见性、删除、编辑

use std::{sync::Arc, time::Instant};

use log::{error, info, warn};
use tokio::{
    io::{AsyncBufReadExt, BufReader, Stdin},
    runtime::Builder,
};

use project_gallery::{
    page::{LoadState, Notice, NoticeKind},
    param::CARD_DESCRIPTION_LENGTH,
    util::{field_input, format_date, truncate, CLEAR_TOKEN},
    AdminPage, ApiService, Config, EditPage, GalleryPage, GestureEvent, Project, ProjectStatus,
    SecretGesture, StatusFilter, SubmitPage,
};

type Input = BufReader<Stdin>;

fn main() {
    // 1. 日志系统：log4rs，通过外部 YAML 配置级别与输出目的地
    if let Err(e) = log4rs::init_file("config/log4rs.yaml", Default::default()) {
        eprintln!("日志配置加载失败：{}", e);
    }

    // 2. 运行配置
    let config = match Config::from_toml("config/development.toml") {
        Ok(config) => config,
        Err(e) => {
            warn!("{}，使用默认配置", e);
            Config::new()
        }
    };
    info!(
        "配置文件已载入，环境：{:?}，后端：{}",
        config.environment(),
        config.api_url()
    );

    // 3. 控制台只驱动一个交互会话，单线程运行时即可
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("无法创建异步运行时：{}", e);
            return;
        }
    };
    runtime.block_on(run(config));
}

async fn run(config: Config) {
    let api = Arc::new(ApiService::from_config(&config));
    let mut gallery = GalleryPage::new(Arc::clone(&api));
    let mut submit = SubmitPage::new(Arc::clone(&api));
    let mut edit = EditPage::new(Arc::clone(&api));
    let mut admin = AdminPage::new(Arc::clone(&api));
    let mut gesture = SecretGesture::default();

    let mut input = BufReader::new(tokio::io::stdin());

    if gallery.fetch().await.is_ok() {
        print_gallery(&gallery);
    } else {
        print_state(gallery.state());
    }
    println!("输入 help 查看可用命令");

    loop {
        let line = match read_line(&mut input).await {
            Some(line) => line,
            None => break,
        };
        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line.as_str(), ""),
        };

        match cmd {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => break,
            "list" => print_gallery(&gallery),
            "refresh" | "retry" => match gallery.fetch().await {
                Ok(_) => print_gallery(&gallery),
                Err(_) => print_state(gallery.state()),
            },
            "search" => {
                gallery.set_search(arg);
                print_gallery(&gallery);
            }
            "filter" => match StatusFilter::parse(arg) {
                Some(filter) => {
                    gallery.set_filter(filter);
                    print_gallery(&gallery);
                }
                None => println!("未知状态：{}（可用：all / not-started / in-progress / completed）", arg),
            },
            "clear" => {
                gallery.clear_all_filters();
                print_gallery(&gallery);
            }
            "show" => match gallery.projects().iter().find(|p| p.id == arg) {
                Some(project) => print_detail(project),
                None => println!("Project not found"),
            },
            "submit" => run_submit(&mut input, &mut submit).await,
            "mine" => {
                let _ = edit.find(arg).await;
                if let Some(message) = edit.field_errors().get("email") {
                    println!("{}", message);
                }
                print_notice(edit.notice());
                for project in edit.projects() {
                    print_card(project);
                }
            }
            "edit" => run_edit(&mut input, &mut edit, arg).await,
            "logo" => match gesture.click(Instant::now()) {
                GestureEvent::Counted(_) => {}
                GestureEvent::Shake(n) => println!("{}", "~".repeat(n as usize)),
                GestureEvent::Activated => run_login(&mut input, &mut admin).await,
            },
            "admin" => run_admin(&mut input, &mut admin, arg).await,
            "logout" => {
                admin.logout();
                println!("已退出管理员会话");
            }
            _ => println!("无效的命令：{}", cmd),
        }
    }
    info!("控制台退出");
}

fn print_help() {
    println!("== Project Gallery Help ==");
    println!("list                 - 显示当前筛选下的项目");
    println!("refresh              - 重新拉取项目");
    println!("search <关键字>      - 按标题、团队、描述或状态搜索");
    println!("filter <状态>        - all / not-started / in-progress / completed");
    println!("clear                - 清除筛选与搜索");
    println!("show <id>            - 查看项目详情");
    println!("submit               - 提交新项目");
    println!("mine <邮箱>          - 查找自己提交的项目");
    println!("edit <id>            - 编辑已查找到的项目");
    println!("admin list|show <id>|hide <id>|delete <id>|edit <id>|refresh");
    println!("logout               - 退出管理员会话");
    println!("quit                 - 退出");
    println!("==========================");
}

async fn read_line(input: &mut Input) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line).await {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// 输出提示并读取一行：空输入保留 `default`，输入 `-` 清空
async fn prompt(input: &mut Input, label: &str, default: &str) -> Option<String> {
    if default.is_empty() {
        println!("{}:", label);
    } else {
        println!("{} [{}]（{} 清空）:", label, default, CLEAR_TOKEN);
    }
    let line = read_line(input).await?;
    Some(field_input(&line, default))
}

async fn prompt_status(input: &mut Input, current: ProjectStatus) -> Option<ProjectStatus> {
    let text = prompt(input, "Status (Not Started / In Progress / Completed)", current.label()).await?;
    match StatusFilter::parse(&text) {
        Some(StatusFilter::Only(status)) => Some(status),
        _ => Some(current),
    }
}

fn print_state(state: &LoadState) {
    match state {
        LoadState::Idle => {}
        LoadState::Loading => println!("Loading..."),
        LoadState::Ready => {}
        LoadState::Failed(message) => println!("{}（输入 retry 重试）", message),
    }
}

fn print_notice(notice: Option<&Notice>) {
    if let Some(notice) = notice {
        match notice.kind {
            NoticeKind::Success => println!("[OK] {}", notice.message),
            NoticeKind::Error => println!("[ERROR] {}", notice.message),
        }
    }
}

fn print_card(project: &Project) {
    println!("[{}] {} ({})", project.id, project.title, project.status);
    println!("    {}", truncate(&project.description, CARD_DESCRIPTION_LENGTH));
    let members = project.members();
    if !members.is_empty() {
        println!("    Team: {}", members.join(", "));
    }
}

fn print_detail(project: &Project) {
    println!("== {} ==", project.title);
    println!("Status: {}", project.status);
    println!("Team: {}", project.team);
    if let Some(date) = project.created_at.as_deref().and_then(format_date) {
        println!("Submitted: {}", date);
    }
    println!("{}", project.description);
    for (label, link) in [
        ("Link", &project.link),
        ("GitHub", &project.github),
        ("Demo", &project.demo),
    ] {
        if let Some(link) = link {
            println!("{}: {}", label, link);
        }
    }
}

fn print_gallery(gallery: &GalleryPage) {
    let stats = gallery.stats();
    println!(
        "Total: {}  Completed: {}  In Progress: {}",
        stats.total, stats.completed, stats.in_progress
    );
    println!("{}", gallery.results_text());
    for project in gallery.visible_projects() {
        print_card(project);
    }
}

async fn run_submit(input: &mut Input, submit: &mut SubmitPage) {
    let form = submit.form().clone();
    let Some(title) = prompt(input, "Project title", &form.title).await else { return };
    let Some(description) = prompt(input, "Description", &form.description).await else { return };
    let Some(email) = prompt(input, "Contact email", &form.email).await else { return };
    let Some(status) = prompt_status(input, form.status).await else { return };
    let Some(link) = prompt(input, "Project link (optional)", &form.link).await else { return };

    let form = submit.form_mut();
    form.title = title;
    form.description = description;
    form.email = email;
    form.status = status;
    form.link = link;

    println!("Team members, one per line, empty line to finish:");
    let mut index = 0;
    loop {
        let Some(name) = read_line(input).await else { return };
        if name.is_empty() {
            break;
        }
        let form = submit.form_mut();
        if index >= form.members().len() {
            form.add_member();
        }
        form.set_member(index, &name);
        index += 1;
    }

    match submit.submit().await {
        Ok(_) => print_notice(submit.notice()),
        Err(_) => {
            for (field, message) in submit.field_errors() {
                println!("{}: {}", field, message);
            }
            print_notice(submit.notice());
        }
    }
}

async fn run_edit(input: &mut Input, edit: &mut EditPage, id: &str) {
    let form = match edit.select(id) {
        Ok(form) => form.clone(),
        Err(_) => {
            print_notice(edit.notice());
            return;
        }
    };
    let Some(title) = prompt(input, "Project title", &form.title).await else { return };
    let Some(status) = prompt_status(input, form.status).await else { return };
    let Some(description) = prompt(input, "Description", &form.description).await else { return };
    let Some(team) = prompt(input, "Team", &form.team).await else { return };
    let Some(github) = prompt(input, "GitHub URL", &form.github).await else { return };
    let Some(demo) = prompt(input, "Demo URL", &form.demo).await else { return };

    if let Some(form) = edit.form_mut() {
        form.title = title;
        form.status = status;
        form.description = description;
        form.team = team;
        form.github = github;
        form.demo = demo;
    }
    if edit.save().await.is_err() {
        for (field, message) in edit.field_errors() {
            println!("{}: {}", field, message);
        }
    }
    print_notice(edit.notice());
}

async fn run_login(input: &mut Input, admin: &mut AdminPage) {
    if admin.is_authenticated() {
        println!("已处于管理员会话");
        return;
    }
    let Some(password) = prompt(input, "Admin password", "").await else { return };
    if admin.login(&password).await {
        println!("管理员登录成功");
        print_admin(admin);
    } else {
        println!("Invalid password");
    }
}

fn print_admin(admin: &AdminPage) {
    let stats = admin.stats();
    println!(
        "Total: {}  Visible: {}  Hidden: {}",
        stats.total, stats.visible, stats.hidden
    );
    for project in admin.projects() {
        let flag = if project.visible { "visible" } else { "hidden" };
        println!("[{}] {} ({}, {})", project.id, project.title, project.status, flag);
    }
}

async fn run_admin(input: &mut Input, admin: &mut AdminPage, arg: &str) {
    if !admin.is_authenticated() {
        println!("Admin login required");
        return;
    }
    let (sub, id) = match arg.split_once(' ') {
        Some((sub, id)) => (sub, id.trim()),
        None => (arg, ""),
    };

    match sub {
        "list" => print_admin(admin),
        "refresh" => match admin.fetch_projects().await {
            Ok(_) => print_admin(admin),
            Err(_) => print_state(admin.state()),
        },
        "show" | "hide" => {
            let _ = admin.toggle_visibility(id, sub == "show").await;
            print_notice(admin.take_notice().as_ref());
        }
        "delete" => {
            let title = match admin.open_delete(id) {
                Ok(project) => project.title.clone(),
                Err(_) => {
                    print_notice(admin.take_notice().as_ref());
                    return;
                }
            };
            let answer = prompt(input, &format!("Delete \"{}\"? (y/N)", title), "n").await;
            if answer.as_deref() == Some("y") {
                let _ = admin.confirm_delete().await;
                print_notice(admin.take_notice().as_ref());
            } else {
                admin.close_delete();
            }
        }
        "edit" => run_admin_edit(input, admin, id).await,
        _ => println!("无效的管理命令：{}", arg),
    }
}

async fn run_admin_edit(input: &mut Input, admin: &mut AdminPage, id: &str) {
    let draft = match admin.open_edit(id) {
        Ok(draft) => draft.clone(),
        Err(_) => {
            print_notice(admin.take_notice().as_ref());
            return;
        }
    };
    let Some(title) = prompt(input, "Project title", &draft.title).await else { return };
    let Some(status) = prompt_status(input, draft.status).await else { return };
    let Some(description) = prompt(input, "Description", &draft.description).await else { return };
    let Some(team) = prompt(input, "Team", &draft.team).await else { return };
    let Some(email) = prompt(input, "Email", &draft.email).await else { return };
    let Some(github) = prompt(input, "GitHub URL", &draft.github).await else { return };
    let Some(demo) = prompt(input, "Demo URL", &draft.demo).await else { return };

    if let Some(draft) = admin.edit_draft_mut() {
        draft.title = title;
        draft.status = status;
        draft.description = description;
        draft.team = team;
        draft.email = email;
        draft.github = github;
        draft.demo = demo;
    }
    if admin.save_edit().await.is_err() {
        for (field, message) in admin.edit_errors() {
            println!("{}: {}", field, message);
        }
    }
    print_notice(admin.take_notice().as_ref());
    admin.close_edit();
}
